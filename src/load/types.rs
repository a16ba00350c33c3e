use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

/// Canonical recipe attributes a source can map onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeAttr {
    Title,
    Time,
    Url,
    PhotoUrl,
}

impl RecipeAttr {
    /// Column this attribute is stored in
    pub fn column(self) -> &'static str {
        match self {
            RecipeAttr::Title => "title",
            RecipeAttr::Time => "time",
            RecipeAttr::Url => "url",
            RecipeAttr::PhotoUrl => "photourl",
        }
    }
}

/// Per-source descriptor: how to project a raw record onto the canonical schema.
///
/// Entirely data-driven - a source is a row in [`SOURCES`], not a trait impl.
/// Only the attributes a source declares in `fields` are required of its
/// records; everything else in a record is ignored.
#[derive(Debug, Clone)]
pub struct SourceSpec {
    /// Source name, e.g. "allrecipes"
    pub name: &'static str,

    /// Default file name under the data directory
    pub file: &'static str,

    /// (canonical attribute, source key) pairs; a record missing any of these
    /// keys fails as a unit
    pub fields: &'static [(RecipeAttr, &'static str)],

    /// Key holding the array of ingredient strings
    pub ingredients: &'static str,

    /// Key holding the array of instruction strings, in presentation order
    pub instructions: &'static str,
}

impl SourceSpec {
    /// INSERT statement covering exactly the columns this source declares
    pub fn insert_sql(&self) -> String {
        let columns: Vec<&str> = self.fields.iter().map(|(attr, _)| attr.column()).collect();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
        format!(
            "INSERT INTO recipe ({}) VALUES ({})",
            columns.join(", "),
            placeholders.join(", ")
        )
    }
}

/// The four upstream recipe dumps this tool understands
pub const SOURCES: &[SourceSpec] = &[
    SourceSpec {
        name: "allrecipes",
        file: "allrecipes-recipes.json",
        fields: &[
            (RecipeAttr::Title, "title"),
            (RecipeAttr::Time, "total_time_minutes"),
            (RecipeAttr::Url, "url"),
            (RecipeAttr::PhotoUrl, "photo_url"),
        ],
        ingredients: "ingredients",
        instructions: "instructions",
    },
    SourceSpec {
        name: "bbccouk",
        file: "bbccouk-recipes.json",
        fields: &[
            (RecipeAttr::Title, "title"),
            (RecipeAttr::Time, "total_time_minutes"),
            (RecipeAttr::Url, "url"),
            (RecipeAttr::PhotoUrl, "photo_url"),
        ],
        ingredients: "ingredients",
        instructions: "instructions",
    },
    SourceSpec {
        name: "epicurious",
        file: "epicurious-recipes.json",
        fields: &[(RecipeAttr::Title, "hed"), (RecipeAttr::Url, "url")],
        ingredients: "ingredients",
        instructions: "prepSteps",
    },
    SourceSpec {
        name: "cookstr",
        file: "cookstr-recipes.json",
        fields: &[
            (RecipeAttr::Title, "title"),
            (RecipeAttr::Time, "total_time"),
            (RecipeAttr::Url, "url"),
            (RecipeAttr::PhotoUrl, "photo_url"),
        ],
        ingredients: "ingredients",
        instructions: "instructions",
    },
];

/// Resolved run configuration: which sources to load and where their files live.
///
/// Built once at startup and passed into the driver; nothing reads file paths
/// from ambient state.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    pub data_dir: PathBuf,
    pub sources: Vec<&'static SourceSpec>,
}

impl LoadConfig {
    /// All built-in sources, rooted at `data_dir`
    pub fn all(data_dir: impl Into<PathBuf>) -> Self {
        LoadConfig {
            data_dir: data_dir.into(),
            sources: SOURCES.iter().collect(),
        }
    }

    /// A subset of the built-in sources by name, in the order given
    pub fn select(data_dir: impl Into<PathBuf>, names: &[String]) -> Result<Self> {
        let mut sources = Vec::with_capacity(names.len());
        for name in names {
            let spec = SOURCES
                .iter()
                .find(|spec| spec.name == name.as_str())
                .with_context(|| {
                    format!("unknown source `{name}` (expected one of: {})", known_names())
                })?;
            sources.push(spec);
        }
        Ok(LoadConfig {
            data_dir: data_dir.into(),
            sources,
        })
    }

    /// File path for one configured source
    pub fn source_path(&self, spec: &SourceSpec) -> PathBuf {
        self.data_dir.join(spec.file)
    }
}

fn known_names() -> String {
    SOURCES
        .iter()
        .map(|spec| spec.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Outcome of loading a single source
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub source: String,

    /// Records pulled from the file, including ones that failed
    pub attempted: usize,

    /// Records that made it into the database
    pub loaded: usize,

    /// Records skipped because parsing, extraction, or insertion failed
    pub failed: usize,
}
