/// Parse and validate the `--app-name` value.
///
/// The name must be a single URL path segment because it is used both as a
/// directory under the output root and as the mount point in served URLs.
///
/// # Examples
///
/// Valid names: Quizify, my-app, docs_v2
/// Invalid names: "", "a/b", "..", "x?y"
///
/// # Errors
///
/// Returns an error message if the name is invalid.
pub fn parse_app_name(s: &str) -> Result<String, String> {
    crate::config::validate_app_name(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}
