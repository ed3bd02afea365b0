//! Character artwork and user avatar resolution

use super::resolver::{ImageKind, MediaResolver};
use crate::types::ResolveCharacter;

impl MediaResolver {
    /// Pick the artwork URL to show for a character or roster slot.
    ///
    /// Candidates in order: `banner_url`, `image_url`, legacy `banner`,
    /// legacy `image`. Each is resolved first, so a present but blank
    /// reference falls through to the next one.
    pub fn resolve_character_artwork<E: ResolveCharacter + ?Sized>(&self, entry: &E) -> Option<String> {
        let character = entry.character()?;

        [
            (character.banner_url.as_deref(), ImageKind::Banner),
            (character.image_url.as_deref(), ImageKind::Portrait),
            (character.banner.as_deref(), ImageKind::Banner),
            (character.image.as_deref(), ImageKind::Portrait),
        ]
        .into_iter()
        .find_map(|(reference, kind)| self.build_media_url(reference, kind))
    }

    /// Resolve a user avatar reference (profile and comment views)
    pub fn resolve_avatar(&self, reference: Option<&str>) -> Option<String> {
        self.build_media_url(reference, ImageKind::Avatar)
    }
}
