pub const MAX_NAME_CHARS: usize = 100;
pub const EXTENSION: &str = ".jpeg";

/// Derives a local file name from the last path segment of `url`.
///
/// Anything other than alphanumerics, `_`, `-` and `.` becomes `_`, the
/// result is cut to 100 characters and `.jpeg` is appended unless the cut
/// name already ends with it.
pub fn sanitize_filename(url: &str) -> String {
  let tail = url.rsplit_once('/').map_or(url, |(_, tail)| tail);

  let mut filename: String = tail
    .chars()
    .map(|c| {
      if c.is_alphanumeric() || matches!(c, '_' | '-' | '.') {
        c
      } else {
        '_'
      }
    })
    .take(MAX_NAME_CHARS)
    .collect();

  if !filename.ends_with(EXTENSION) {
    filename.push_str(EXTENSION);
  }
  filename
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn appends_extension() {
    assert_eq!(sanitize_filename("https://a.com/x.png"), "x.png.jpeg");
    assert_eq!(sanitize_filename("https://a.com/photo.jpeg"), "photo.jpeg");
  }

  #[test]
  fn replaces_unsafe_chars() {
    assert_eq!(
      sanitize_filename("https://drive.google.com/uc?id=AB-c_1&export=download"),
      "uc_id_AB-c_1_export_download.jpeg"
    );
    assert_eq!(sanitize_filename("https://a.com/a b%20c"), "a_b_20c.jpeg");
  }

  #[test]
  fn keeps_unicode_letters() {
    assert_eq!(sanitize_filename("https://a.com/café.png"), "café.png.jpeg");
  }

  #[test]
  fn no_slash_uses_whole_input() {
    assert_eq!(sanitize_filename("img:1"), "img_1.jpeg");
  }

  #[test]
  fn trailing_slash_gives_bare_extension() {
    assert_eq!(sanitize_filename("https://a.com/"), ".jpeg");
  }

  #[test]
  fn truncates_before_extension_check() {
    let long = "a".repeat(150);
    let name = sanitize_filename(&format!("https://a.com/{}", long));
    assert_eq!(name, format!("{}.jpeg", "a".repeat(100)));

    // the cut lands inside an existing extension
    let tail = format!("{}.jpeg", "b".repeat(97));
    assert_eq!(
      sanitize_filename(&format!("https://a.com/{}", tail)),
      format!("{}.jp.jpeg", "b".repeat(97))
    );

    // the cut lands exactly after an existing extension
    let tail = format!("{}.jpeg.png", "c".repeat(95));
    assert_eq!(
      sanitize_filename(&format!("https://a.com/{}", tail)),
      format!("{}.jpeg", "c".repeat(95))
    );
  }

  #[test]
  fn doubled_extension_is_kept() {
    assert_eq!(sanitize_filename("https://a.com/x.jpeg.jpeg"), "x.jpeg.jpeg");
  }

  #[test]
  fn idempotent_on_short_sanitized_names() {
    let longest = format!("{}.jpeg", "z".repeat(95));
    for name in ["x.jpeg", "a_b-c.d.jpeg", longest.as_str()] {
      let once = sanitize_filename(name);
      assert_eq!(once, name);
      assert_eq!(sanitize_filename(&once), once);
    }
  }
}
