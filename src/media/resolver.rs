//! Media reference to absolute URL resolution

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;
use url::Url;

use super::cdn;
use crate::config::MediaSettings;

// ─────────────────────────────────────────────────────────────────
// Image Kind
// ─────────────────────────────────────────────────────────────────

/// What an image is displayed as; selects the CDN transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    /// User avatar (square face crop)
    Avatar,
    /// Character portrait
    Portrait,
    /// Wide character banner
    Banner,
}

impl ImageKind {
    pub fn slug(&self) -> &'static str {
        match self {
            ImageKind::Avatar => "avatar",
            ImageKind::Portrait => "portrait",
            ImageKind::Banner => "banner",
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for ImageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "avatar" => Ok(ImageKind::Avatar),
            "portrait" | "image" => Ok(ImageKind::Portrait),
            "banner" => Ok(ImageKind::Banner),
            _ => Err(format!(
                "Unknown image kind '{}'. Valid: avatar, portrait, banner",
                s
            )),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Resolver
// ─────────────────────────────────────────────────────────────────

/// Resolves raw media references against a root origin and CDN policy.
///
/// Resolution is a pure function of the reference and these settings.
#[derive(Debug, Clone)]
pub struct MediaResolver {
    root_origin: String,
    cdn_hosts: Vec<String>,
    upload_marker: String,
    avatar_transform: String,
    portrait_transform: String,
    banner_transform: String,
}

impl MediaResolver {
    /// Create a resolver from media settings
    pub fn new(settings: &MediaSettings) -> Self {
        Self {
            root_origin: settings.root_origin.trim().trim_end_matches('/').to_string(),
            cdn_hosts: settings.cdn_hosts.clone(),
            upload_marker: settings.upload_marker.clone(),
            avatar_transform: settings.transforms.avatar.clone(),
            portrait_transform: settings.transforms.portrait.clone(),
            banner_transform: settings.transforms.banner.clone(),
        }
    }

    /// Create a resolver with default settings and the given root origin
    pub fn with_root(root_origin: impl Into<String>) -> Self {
        Self::new(&MediaSettings {
            root_origin: root_origin.into(),
            ..Default::default()
        })
    }

    /// Origin relative references are joined to (no trailing slash)
    pub fn root_origin(&self) -> &str {
        &self.root_origin
    }

    fn transform_for(&self, kind: ImageKind) -> &str {
        match kind {
            ImageKind::Avatar => &self.avatar_transform,
            ImageKind::Portrait => &self.portrait_transform,
            ImageKind::Banner => &self.banner_transform,
        }
    }

    /// Resolve a raw reference into an absolute URL.
    ///
    /// Returns `None` for a missing or blank reference. Absolute `http(s)`
    /// URLs are kept, protocol-relative ones (`//host/...`) upgraded to
    /// `https`, anything else is joined to the root origin with exactly one slash. CDN URLs
    /// then lose their version segment and gain the `kind` transform unless
    /// one is already present.
    pub fn build_media_url(&self, reference: Option<&str>, kind: ImageKind) -> Option<String> {
        let reference = reference.map(str::trim).filter(|r| !r.is_empty())?;

        let absolute = if has_prefix_ignore_case(reference, "http://")
            || has_prefix_ignore_case(reference, "https://")
        {
            reference.to_string()
        } else if let Some(rest) = reference
            .strip_prefix("//")
            .filter(|rest| !rest.is_empty() && !rest.starts_with('/'))
        {
            format!("https://{}", rest)
        } else {
            let path = reference.trim_start_matches('/');
            if path.is_empty() {
                return None;
            }
            format!("{}/{}", self.root_origin, path)
        };

        Some(self.apply_cdn_policy(absolute, kind))
    }

    /// Strip versions and inject transforms for CDN-hosted URLs
    fn apply_cdn_policy(&self, absolute: String, kind: ImageKind) -> String {
        let Ok(mut url) = Url::parse(&absolute) else {
            trace!(url = %absolute, "Unparseable media URL left as-is");
            return absolute;
        };

        let is_cdn = url
            .host_str()
            .is_some_and(|host| cdn::is_cdn_host(host, &self.cdn_hosts));
        if !is_cdn {
            return absolute;
        }

        let segments: Vec<&str> = match url.path_segments() {
            Some(segments) => segments.collect(),
            None => return absolute,
        };
        let Some(normalized) =
            cdn::normalize_segments(&segments, &self.upload_marker, self.transform_for(kind))
        else {
            return absolute;
        };

        url.set_path(&format!("/{}", normalized.join("/")));
        trace!(from = %absolute, to = %url, kind = %kind, "Applied CDN policy");
        url.into()
    }
}

impl Default for MediaResolver {
    fn default() -> Self {
        Self::new(&MediaSettings::default())
    }
}

fn has_prefix_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransformSettings;

    fn resolver() -> MediaResolver {
        MediaResolver::new(&MediaSettings {
            root_origin: "https://api.example/".to_string(),
            cdn_hosts: vec!["cdn.example".to_string()],
            upload_marker: "upload".to_string(),
            transforms: TransformSettings {
                avatar: "c_thumb,w_128".to_string(),
                portrait: "c_fill,w_400".to_string(),
                banner: "c_fill,w_1200".to_string(),
            },
        })
    }

    #[test]
    fn test_missing_and_blank() {
        let r = resolver();
        assert_eq!(r.build_media_url(None, ImageKind::Portrait), None);
        assert_eq!(r.build_media_url(Some(""), ImageKind::Portrait), None);
        assert_eq!(r.build_media_url(Some("   "), ImageKind::Portrait), None);
        assert_eq!(r.build_media_url(Some("/"), ImageKind::Portrait), None);
    }

    #[test]
    fn test_relative_paths_single_slash() {
        let r = resolver();
        assert_eq!(
            r.build_media_url(Some("heroes/foo.png"), ImageKind::Portrait).as_deref(),
            Some("https://api.example/heroes/foo.png")
        );
        assert_eq!(
            r.build_media_url(Some("/media/heroes/foo.png"), ImageKind::Portrait).as_deref(),
            Some("https://api.example/media/heroes/foo.png")
        );
    }

    #[test]
    fn test_absolute_kept() {
        let r = resolver();
        let url = "https://images.example/a/b.png?size=2";
        assert_eq!(r.build_media_url(Some(url), ImageKind::Banner).as_deref(), Some(url));
        assert_eq!(
            r.build_media_url(Some("HTTP://Images.example/x.png"), ImageKind::Banner).as_deref(),
            Some("HTTP://Images.example/x.png")
        );
    }

    #[test]
    fn test_protocol_relative_upgraded() {
        let r = resolver();
        assert_eq!(
            r.build_media_url(Some("//images.example/x.png"), ImageKind::Portrait).as_deref(),
            Some("https://images.example/x.png")
        );
    }

    #[test]
    fn test_extra_leading_slashes_are_root_relative() {
        let r = resolver();
        assert_eq!(
            r.build_media_url(Some("///media/x.png"), ImageKind::Portrait).as_deref(),
            Some("https://api.example/media/x.png")
        );
        assert_eq!(r.build_media_url(Some("//"), ImageKind::Portrait), None);
        assert_eq!(r.build_media_url(Some("///"), ImageKind::Portrait), None);
    }

    #[test]
    fn test_cdn_transform_per_kind() {
        let r = resolver();
        let raw = Some("https://cdn.example/image/upload/v123/x.png");
        assert_eq!(
            r.build_media_url(raw, ImageKind::Avatar).as_deref(),
            Some("https://cdn.example/image/upload/c_thumb,w_128/x.png")
        );
        assert_eq!(
            r.build_media_url(raw, ImageKind::Banner).as_deref(),
            Some("https://cdn.example/image/upload/c_fill,w_1200/x.png")
        );
    }

    #[test]
    fn test_cdn_idempotent() {
        let r = resolver();
        let once = r
            .build_media_url(Some("https://cdn.example/image/upload/v123/x.png"), ImageKind::Portrait)
            .unwrap();
        let twice = r.build_media_url(Some(&once), ImageKind::Portrait).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once.matches("c_fill").count(), 1);
        assert!(!once.contains("v123"));
    }

    #[test]
    fn test_cdn_query_preserved() {
        let r = resolver();
        assert_eq!(
            r.build_media_url(Some("//cdn.example/image/upload/v5/x.png?dl=1"), ImageKind::Portrait)
                .as_deref(),
            Some("https://cdn.example/image/upload/c_fill,w_400/x.png?dl=1")
        );
    }

    #[test]
    fn test_cdn_without_marker_untouched() {
        let r = resolver();
        let url = "https://cdn.example/static/v1/x.png";
        assert_eq!(r.build_media_url(Some(url), ImageKind::Portrait).as_deref(), Some(url));
    }

    #[test]
    fn test_root_on_cdn_host() {
        let r = MediaResolver::new(&MediaSettings {
            root_origin: "https://cdn.example/demo".to_string(),
            cdn_hosts: vec!["cdn.example".to_string()],
            ..Default::default()
        });
        let url = r.build_media_url(Some("image/upload/v3/a.png"), ImageKind::Banner).unwrap();
        assert!(url.starts_with("https://cdn.example/demo/image/upload/c_fill"));
        assert!(url.ends_with("/a.png"));
    }

    #[test]
    fn test_image_kind_from_str() {
        assert_eq!("Avatar".parse::<ImageKind>().unwrap(), ImageKind::Avatar);
        assert_eq!("banner".parse::<ImageKind>().unwrap(), ImageKind::Banner);
        assert!("poster".parse::<ImageKind>().is_err());
    }

    #[test]
    fn test_with_root() {
        let r = MediaResolver::with_root("https://api.example///");
        assert_eq!(r.root_origin(), "https://api.example");
    }
}
