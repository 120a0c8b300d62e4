use serde::{Deserialize, Serialize};

pub const TITLE_MAX_CHARS: usize = 100;
pub const MESSAGE_MAX_CHARS: usize = 500;
pub const AUTHOR_MAX_CHARS: usize = 50;

/// The six plantable flower kinds. Unknown tags are rejected when
/// deserializing, so a record that reaches the rest of the system always
/// carries a known kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowerKind {
    RedTulip,
    WhiteRose,
    YellowSunflower,
    PinkCarnation,
    BlueForgetMeNot,
    OrangeLily,
}

#[derive(Debug, Clone, Copy)]
pub struct FlowerMeta {
    pub name: &'static str,
    pub meaning: &'static str,
    pub tags: &'static [&'static str],
    pub image: &'static str,
    pub render_width: f64,
}

impl FlowerKind {
    pub const ALL: [FlowerKind; 6] = [
        FlowerKind::RedTulip,
        FlowerKind::WhiteRose,
        FlowerKind::YellowSunflower,
        FlowerKind::PinkCarnation,
        FlowerKind::BlueForgetMeNot,
        FlowerKind::OrangeLily,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            FlowerKind::RedTulip => "red-tulip",
            FlowerKind::WhiteRose => "white-rose",
            FlowerKind::YellowSunflower => "yellow-sunflower",
            FlowerKind::PinkCarnation => "pink-carnation",
            FlowerKind::BlueForgetMeNot => "blue-forget-me-not",
            FlowerKind::OrangeLily => "orange-lily",
        }
    }

    pub fn from_tag(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(trimmed))
    }

    pub fn meta(self) -> &'static FlowerMeta {
        match self {
            FlowerKind::RedTulip => &RED_TULIP_META,
            FlowerKind::WhiteRose => &WHITE_ROSE_META,
            FlowerKind::YellowSunflower => &YELLOW_SUNFLOWER_META,
            FlowerKind::PinkCarnation => &PINK_CARNATION_META,
            FlowerKind::BlueForgetMeNot => &BLUE_FORGET_ME_NOT_META,
            FlowerKind::OrangeLily => &ORANGE_LILY_META,
        }
    }
}

const RED_TULIP_META: FlowerMeta = FlowerMeta {
    name: "Red Tulip",
    meaning: "Deep love and belief in better days.",
    tags: &["love", "passion", "courage"],
    image: "flowers/red-tulip.png",
    render_width: 100.0,
};

const WHITE_ROSE_META: FlowerMeta = FlowerMeta {
    name: "White Rose",
    meaning: "New beginnings and quiet remembrance.",
    tags: &["purity", "remembrance", "hope"],
    image: "flowers/white-rose.png",
    render_width: 115.0,
};

const YELLOW_SUNFLOWER_META: FlowerMeta = FlowerMeta {
    name: "Sunflower",
    meaning: "Warmth, loyalty and facing the light.",
    tags: &["joy", "loyalty", "warmth"],
    image: "flowers/yellow-sunflower.png",
    render_width: 100.0,
};

const PINK_CARNATION_META: FlowerMeta = FlowerMeta {
    name: "Pink Carnation",
    meaning: "Gratitude for someone never forgotten.",
    tags: &["gratitude", "admiration", "kindness"],
    image: "flowers/pink-carnation.png",
    render_width: 100.0,
};

const BLUE_FORGET_ME_NOT_META: FlowerMeta = FlowerMeta {
    name: "Forget-Me-Not",
    meaning: "A promise to remember, wherever you are.",
    tags: &["memory", "connection", "faithfulness"],
    image: "flowers/blue-forget-me-not.png",
    render_width: 115.0,
};

const ORANGE_LILY_META: FlowerMeta = FlowerMeta {
    name: "Orange Lily",
    meaning: "Confidence and energy for what comes next.",
    tags: &["confidence", "energy", "growth"],
    image: "flowers/orange-lily.png",
    render_width: 100.0,
};

/// A planted flower as persisted by the backend. Created once, immutable
/// afterwards; there are no update or delete operations anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flower {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub x: i64,
    pub y: i64,
    #[serde(rename = "flower")]
    pub kind: FlowerKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Flower {
    pub fn position(&self) -> (f64, f64) {
        (self.x as f64, self.y as f64)
    }
}
