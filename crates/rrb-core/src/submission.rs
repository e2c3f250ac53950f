//! Inbound payload model (one survey/test submission).

use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer,
};

/// One submission as POSTed by the survey page. Immutable once parsed; lives
/// for a single request.
#[derive(Clone, Debug, Deserialize)]
pub struct Submission {
    pub fio: String,
    pub telegram: String,
    pub submitted_at_local: String,
    pub summary: Summary,
    /// Item code -> item, in JSON insertion order. Rendering must walk the
    /// items in the order the page submitted them, so this is not a HashMap.
    #[serde(deserialize_with = "ordered_items")]
    pub items: Vec<(String, Item)>,
    pub page_url: String,
    pub user_agent: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Summary {
    pub total_view_time_formatted: String,
    pub total_typing_time_formatted: String,
    pub items_count: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Item {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub time_view_formatted: String,
    #[serde(default)]
    pub time_typing_formatted: String,
    #[serde(default)]
    pub ads_copy: String,
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub landing: String,
    #[serde(default)]
    pub video: String,
}

fn ordered_items<'de, D>(deserializer: D) -> Result<Vec<(String, Item)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ItemsVisitor;

    impl<'de> Visitor<'de> for ItemsVisitor {
        type Value = Vec<(String, Item)>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a map of item code to item")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, Item>()? {
                out.push(entry);
            }
            Ok(out)
        }
    }

    deserializer.deserialize_map(ItemsVisitor)
}
