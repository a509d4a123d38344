//! Domain normalization for imported URLs.

use url::Url;

/// Domain used when a record has neither a host nor a URL.
pub const FALLBACK_DOMAIN: &str = "easypasswords.invalid";

const WWW_PREFIX: &str = "www.";

/// Derives the site domain from a Lastpass `url` field.
///
/// Takes the URL host, falling back to the raw field and then to
/// [`FALLBACK_DOMAIN`]. A leading `www.` is removed (case-sensitive). The
/// host keeps the letter case it has in the field.
pub fn normalize_domain(url: &str) -> String {
    let host = url_host(url);
    let domain = match host.as_deref() {
        Some(host) => host,
        None if !url.is_empty() => url,
        None => FALLBACK_DOMAIN,
    };
    domain
        .strip_prefix(WWW_PREFIX)
        .unwrap_or(domain)
        .to_string()
}

fn url_host(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw).ok()?;
    let host = parsed.host_str().filter(|host| !host.is_empty())?;
    Some(original_case(raw, host).unwrap_or(host).to_string())
}

/// Finds `host` in the host part of `raw`'s authority (after any userinfo)
/// ignoring ASCII case and returns it as written.
///
/// `Url` lowercases hosts; the store keys sites by the host as the user
/// typed it. Returns `None` when the host was rewritten beyond case
/// (punycode, percent-decoding).
fn original_case<'a>(raw: &'a str, host: &str) -> Option<&'a str> {
    let start = raw.find("://").map_or(0, |index| index + 3);
    let rest = raw.get(start..)?;
    let authority = &rest[..rest.find(['/', '\\', '?', '#']).unwrap_or(rest.len())];
    let host_part = authority
        .rfind('@')
        .map_or(authority, |at| &authority[at + 1..]);
    let offset = host_part.to_ascii_lowercase().find(host)?;
    host_part.get(offset..offset + host.len())
}
