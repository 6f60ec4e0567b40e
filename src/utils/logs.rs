pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // module names add nothing to the structured fields.
        .with_target(false)
        // ANSI color codes show up as garbage in CloudWatch logs.
        .with_ansi(false)
        // CloudWatch adds the ingestion time.
        .without_time()
        .json()
        .init();
}
