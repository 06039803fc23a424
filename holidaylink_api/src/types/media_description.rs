//! Media descriptions: titled photo and video attachments.

use crate::resource::{Delete, Resource, Single, Update};

/// The `media-descriptions` resource. Read, update and delete only.
pub struct MediaDescription;

impl Resource for MediaDescription {
    const NAME: &'static str = "MediaDescription";
    const PATH: &'static str = "media-descriptions";
    const FIELDS: &'static [&'static str] = &["id", "title", "photo", "video"];
}

impl Single for MediaDescription {}

impl Update for MediaDescription {}

impl Delete for MediaDescription {}
