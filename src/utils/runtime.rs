use anyhow::Result;

/// Every command is a short request/response, so a current-thread runtime is all the CLI needs.
pub fn single_thread_runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
