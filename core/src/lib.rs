pub mod flower;
pub mod garden;
pub mod geometry;
pub mod protocol;
pub mod scroll;
pub mod slug;

pub use flower::{
    Flower, FlowerKind, FlowerMeta, AUTHOR_MAX_CHARS, MESSAGE_MAX_CHARS, TITLE_MAX_CHARS,
};
pub use garden::{GardenMode, GardenState, PlantAttempt, NEW_FLOWER_GLOW_MS};
pub use protocol::{ApiError, CreateFlower, CreateFlowerError, FlowerQuery};
pub use slug::{is_valid_slug, slug_for_title, Slug, SlugError};
