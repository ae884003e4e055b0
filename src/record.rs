use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Shown in place of a missing image link.
pub const FALLBACK_IMAGE_URL: &str = "https://lh3.googleusercontent.com/proxy/-SbItfvIjj9ISMg5ms8FcBTXCImi5MN76mG3y71PImnAcn4b1LRnGvARyi5o3pTDBodjCMmrMmgIHTbokXt6BLALxlO2Abo";

/// Shown in place of missing comments.
pub const FALLBACK_COMMENTS: &str = "No description of this fish";

/// One species entry, either from the API or added locally.
///
/// Field names follow the API's JSON keys. Anything else the API sends is
/// kept untouched in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FishRecord {
    #[serde(rename = "SpecCode", default)]
    pub spec_code: Option<u64>,
    #[serde(rename = "Species", default, deserialize_with = "null_as_empty")]
    pub species: String,
    #[serde(rename = "Comments", default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FishRecord {
    /// Image link to display, falling back when none is set.
    pub fn display_image(&self) -> &str {
        match self.image.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => FALLBACK_IMAGE_URL,
        }
    }

    /// Comments to display, falling back when none are set.
    pub fn display_comments(&self) -> &str {
        match self.comments.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => FALLBACK_COMMENTS,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response envelope of `GET /species`.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesPage {
    pub data: Vec<FishRecord>,
}

/// Inputs of the add-fish form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Species,
    Comments,
    Image,
}

impl DraftField {
    pub const ALL: [DraftField; 3] = [DraftField::Species, DraftField::Comments, DraftField::Image];

    /// The input's `name`, which is also the record key it fills.
    pub fn name(self) -> &'static str {
        match self {
            DraftField::Species => "Species",
            DraftField::Comments => "Comments",
            DraftField::Image => "image",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DraftField::Species => "Species",
            DraftField::Comments => "Comments",
            DraftField::Image => "Image Link",
        }
    }

    pub fn next(self) -> Self {
        match self {
            DraftField::Species => DraftField::Comments,
            DraftField::Comments => DraftField::Image,
            DraftField::Image => DraftField::Species,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            DraftField::Species => DraftField::Image,
            DraftField::Comments => DraftField::Species,
            DraftField::Image => DraftField::Comments,
        }
    }
}

/// A fish being typed into the form, not yet submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftFish {
    pub species: String,
    pub comments: String,
    pub image: String,
}

impl DraftFish {
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Species => &self.species,
            DraftField::Comments => &self.comments,
            DraftField::Image => &self.image,
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Species => self.species = value,
            DraftField::Comments => self.comments = value,
            DraftField::Image => self.image = value,
        }
    }

    /// Copy the draft into a record. Values are kept verbatim, empty or not.
    pub fn to_record(&self) -> FishRecord {
        FishRecord {
            spec_code: None,
            species: self.species.clone(),
            comments: Some(self.comments.clone()),
            image: Some(self.image.clone()),
            extra: Map::new(),
        }
    }
}
