use shadow_rs::ShadowBuilder;

fn main() {
    // Build metadata for `--version` and the HTTP user agent
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
