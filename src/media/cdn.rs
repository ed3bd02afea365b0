//! Image CDN path normalization
//!
//! CDN image URLs look like `/<cloud>/image/upload/[<transform>/][v<digits>/]<public id>`.
//! Version segments are dropped and, when no transform is present, one is
//! placed right after the upload marker.

/// Whether `host` is one of `cdn_hosts` or a subdomain of one
pub fn is_cdn_host(host: &str, cdn_hosts: &[String]) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    cdn_hosts.iter().any(|cdn| {
        let cdn = cdn.trim().trim_end_matches('.').to_ascii_lowercase();
        host == cdn
            || host
                .strip_suffix(cdn.as_str())
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

/// `v` followed by one or more digits, e.g. `v1712345678`
pub fn is_version_segment(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Comma-separated `<1-3 lowercase letters>_<value>` parameters, e.g. `c_fill,w_256`
pub fn is_transform_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.split(',').all(is_transform_parameter)
}

fn is_transform_parameter(param: &str) -> bool {
    match param.split_once('_') {
        Some((key, value)) => {
            (1..=3).contains(&key.len())
                && key.bytes().all(|b| b.is_ascii_lowercase())
                && !value.is_empty()
        }
        None => false,
    }
}

/// Normalize the segments of a CDN URL path.
///
/// Returns `None` when the path has no upload marker, in which case the URL
/// is left alone. Only segments after the marker are touched, and the final
/// segment (the asset itself) is never treated as a version or transform.
pub fn normalize_segments(segments: &[&str], upload_marker: &str, transform: &str) -> Option<Vec<String>> {
    let marker = segments.iter().position(|s| *s == upload_marker)?;
    let (head, tail) = segments.split_at(marker + 1);

    let last = tail.len().saturating_sub(1);
    let mut rest: Vec<&str> = tail
        .iter()
        .enumerate()
        .filter(|(i, segment)| *i == last || !is_version_segment(segment))
        .map(|(_, segment)| *segment)
        .collect();

    let transform = transform.trim().trim_matches('/');
    let directive: Vec<&str> = transform.split('/').collect();

    // The configured directive counts even outside the parameter grammar
    let has_transform = rest.split_last().is_some_and(|(_, folders)| {
        folders.iter().any(|s| is_transform_segment(s))
            || (!transform.is_empty() && folders.starts_with(&directive))
    });

    if !has_transform && !transform.is_empty() && rest.iter().any(|s| !s.is_empty()) {
        rest.insert(0, transform);
    }

    Some(
        head.iter()
            .chain(rest.iter())
            .map(|s| s.to_string())
            .collect(),
    )
}
