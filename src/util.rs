use crate::error::WeldError;

/// Utility function to ensure output directories exist when needed
pub fn ensure_dir_exists<P: AsRef<std::path::Path>>(
    path: &P,
) -> Result<(), WeldError> {
    // Check if it exists
    let p = path.as_ref();
    if p.exists() {
        if p.is_dir() {
            log::debug!("Exists: {p:?}");
            Ok(())
        } else {
            Err(WeldError::output(
                p,
                std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "not a directory",
                ),
            ))
        }
    } else {
        log::info!("Creating: {p:?}");
        std::fs::create_dir_all(p).map_err(|e| WeldError::output(p, e))
    }
}
