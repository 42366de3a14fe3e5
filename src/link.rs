// sharing link rewriting and input splitting

pub const DRIVE_HOST: &str = "drive.google.com";

const ID_PARAM: &str = "id=";
const ID_PATH: &str = "/d/";

pub fn build_direct_url(file_id: &str) -> String {
  format!("https://{}/uc?id={}&export=download", DRIVE_HOST, file_id)
}

/// Rewrites a Google Drive sharing link into a direct download link.
///
/// Links on other hosts are returned unchanged. A Drive link without an
/// `id=` parameter or a `/d/<id>` path segment yields `None`.
pub fn normalize_link(link: &str) -> Option<String> {
  if !link.contains(DRIVE_HOST) {
    return Some(link.to_string());
  }

  let file_id = if link.contains(ID_PARAM) {
    last_after(link, ID_PARAM).split('&').next()
  } else if link.contains(ID_PATH) {
    last_after(link, ID_PATH).split('/').next()
  } else {
    None
  }?;

  Some(build_direct_url(file_id))
}

// text following the last occurrence of `marker`
fn last_after<'a>(s: &'a str, marker: &str) -> &'a str {
  s.rsplit(marker).next().unwrap_or(s)
}

/// Splits comma separated input, trims each entry and drops empty ones.
pub fn split_links(input: &str) -> Vec<String> {
  input
    .split(',')
    .map(|l| l.trim())
    .filter(|l| !l.is_empty())
    .map(|l| l.to_string())
    .collect()
}

/// Splits the input and normalizes every entry, dropping rejected links.
pub fn parse_links(input: &str) -> Vec<String> {
  split_links(input)
    .iter()
    .filter_map(|l| normalize_link(l))
    .collect()
}
