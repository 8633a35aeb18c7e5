//! Resolve command handler
//!
//! Prints the resolved URLs a load would fetch, in merge order.

use std::io::Write;

use crate::config::Settings;
use crate::remote::UrlResolver;

pub struct ResolveCommandHandler {
    settings: Settings,
}

impl ResolveCommandHandler {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub async fn execute<W: Write>(&self, mut out: W) -> anyhow::Result<()> {
        let options = self.settings.configuration_options();
        let resolver = UrlResolver::new(options.base_url);
        let context = options.context.or_base_url(resolver.base_url());

        let urls = resolver
            .resolve_urls(options.source.as_ref(), &context)
            .await?;
        tracing::debug!(count = urls.len(), "Resolved configuration URLs");

        for url in urls {
            writeln!(out, "{url}")?;
        }
        Ok(())
    }
}
