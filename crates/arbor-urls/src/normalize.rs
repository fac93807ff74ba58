//! Path normalization against the application base prefix.

/// Strips `base_prefix` from `raw_path`.
///
/// Paths outside the base prefix are returned unchanged. The query string
/// and fragment are dropped because routes only identify paths, and a
/// stripped path always keeps its leading `/`.
///
/// ```
/// use arbor_urls::normalize;
///
/// assert_eq!(normalize("/app/settings~profile", "/app"), "/settings~profile");
/// assert_eq!(normalize("/app", "/app"), "/");
/// assert_eq!(normalize("/other/page", "/app"), "/other/page");
/// ```
pub fn normalize(raw_path: &str, base_prefix: &str) -> String {
	let path = strip_query(raw_path);
	let base = base_prefix.trim_end_matches('/');

	if base.is_empty() {
		return path.to_string();
	}

	match path.strip_prefix(base) {
		// `/application` must not be cut by base `/app`
		Some(rest) if rest.is_empty() || rest.starts_with('/') => {
			if rest.starts_with('/') {
				rest.to_string()
			} else {
				format!("/{}", rest)
			}
		}
		_ => path.to_string(),
	}
}

/// Joins the base prefix and an app-relative path with a single `/`.
///
/// ```
/// use arbor_urls::full_path;
///
/// assert_eq!(full_path("/app", "/settings"), "/app/settings");
/// assert_eq!(full_path("/", "/settings"), "/settings");
/// assert_eq!(full_path("/app/", "/"), "/app/");
/// ```
pub fn full_path(base_prefix: &str, path: &str) -> String {
	let base = base_prefix.trim_end_matches('/');
	let rel = path.trim_start_matches('/');

	format!("{}/{}", base, rel)
}

/// Returns true when `url` lies under `base_prefix`.
pub fn is_under_base(url: &str, base_prefix: &str) -> bool {
	let base = base_prefix.trim_end_matches('/');
	if base.is_empty() {
		return url.starts_with('/');
	}

	match url.strip_prefix(base) {
		Some(rest) => {
			rest.is_empty() || rest.starts_with('/') || rest.starts_with('?') || rest.starts_with('#')
		}
		None => false,
	}
}

fn strip_query(path: &str) -> &str {
	let end = path.find(['?', '#']).unwrap_or(path.len());
	&path[..end]
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("/app/settings", "/app", "/settings")]
	#[case("/app/settings~profile", "/app", "/settings~profile")]
	#[case("/app", "/app", "/")]
	#[case("/app/", "/app/", "/")]
	#[case("/other", "/app", "/other")]
	#[case("/application", "/app", "/application")]
	#[case("/home", "/", "/home")]
	#[case("/app/home?tab=2", "/app", "/home")]
	#[case("/app/home#top", "/app", "/home")]
	fn test_normalize(#[case] raw: &str, #[case] base: &str, #[case] expected: &str) {
		assert_eq!(normalize(raw, base), expected);
	}

	#[rstest]
	#[case("/app", "/home", "/app/home")]
	#[case("/app/", "/home", "/app/home")]
	#[case("/", "/home", "/home")]
	#[case("", "home", "/home")]
	fn test_full_path(#[case] base: &str, #[case] path: &str, #[case] expected: &str) {
		assert_eq!(full_path(base, path), expected);
	}

	#[rstest]
	fn test_normalize_then_full_path() {
		let full = full_path("/app", &normalize("/app/settings~profile", "/app"));
		assert_eq!(full, "/app/settings~profile");
	}

	#[rstest]
	#[case("/app/x", "/app", true)]
	#[case("/app", "/app", true)]
	#[case("/apple", "/app", false)]
	#[case("https://example.com/", "/app", false)]
	#[case("/anything", "/", true)]
	fn test_is_under_base(#[case] url: &str, #[case] base: &str, #[case] expected: bool) {
		assert_eq!(is_under_base(url, base), expected);
	}
}
