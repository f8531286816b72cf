//! Static Catalogs
//!
//! Immutable tables of generation modes, models, selectable options and form
//! parameters. Everything here is `'static` and built in `const` context, so a
//! [`Catalog`] is free to copy and never changes at runtime.
//!
//! Options and parameters carry their own entitlement annotations:
//! - an option's `allowed_levels` allow-list (absent = every level)
//! - a parameter's `visibility` condition (modes x levels)
//! - a parameter's `minimum_level` gate, checked independently of `visibility`

use melodia_shared::{GenerationMode, SubscriptionLevel};
use serde::Serialize;

use GenerationMode::{Custom, Inspiration, Instrumental};
use SubscriptionLevel::{Enterprise, Free, Standard};

// =============================================================================
// Options
// =============================================================================

/// A selectable value for a parameter (style, mood, tempo, duration, voice, model)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bpm_range: Option<&'static str>,
    /// Levels allowed to see this option; `None` means every level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_levels: Option<&'static [SubscriptionLevel]>,
}

impl ChoiceOption {
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        Self {
            value,
            label,
            free: None,
            description: None,
            bpm_range: None,
            allowed_levels: None,
        }
    }

    pub const fn free(self, free: bool) -> Self {
        Self {
            free: Some(free),
            ..self
        }
    }

    pub const fn described(self, description: &'static str) -> Self {
        Self {
            description: Some(description),
            ..self
        }
    }

    pub const fn bpm(self, range: &'static str) -> Self {
        Self {
            bpm_range: Some(range),
            ..self
        }
    }

    pub const fn allowed(self, levels: &'static [SubscriptionLevel]) -> Self {
        Self {
            allowed_levels: Some(levels),
            ..self
        }
    }

    /// Whether a caller at `level` may see (and therefore submit) this option
    pub fn visible_to(&self, level: SubscriptionLevel) -> bool {
        self.allowed_levels
            .map_or(true, |levels| levels.contains(&level))
    }
}

/// Signature of a level-dependent option list
pub type OptionsFn = fn(SubscriptionLevel) -> anyhow::Result<Vec<ChoiceOption>>;

/// Where a parameter's options come from.
///
/// Both variants are consumed through [`OptionSource::resolve`], which is a
/// function from level to option list; `Fixed` is the constant function.
/// The allow-list filter is applied to the output of either variant.
#[derive(Debug, Clone, Copy)]
pub enum OptionSource {
    Fixed(&'static [ChoiceOption]),
    Computed(OptionsFn),
}

impl OptionSource {
    pub fn resolve(&self, level: SubscriptionLevel) -> anyhow::Result<Vec<ChoiceOption>> {
        let mut options = match self {
            OptionSource::Fixed(options) => options.to_vec(),
            OptionSource::Computed(compute) => compute(level)?,
        };
        options.retain(|option| option.visible_to(level));
        Ok(options)
    }
}

/// Keep only the options visible at `level`, preserving declaration order
pub fn filter_options(options: &[ChoiceOption], level: SubscriptionLevel) -> Vec<ChoiceOption> {
    options
        .iter()
        .filter(|option| option.visible_to(level))
        .copied()
        .collect()
}

// =============================================================================
// Modes & Models
// =============================================================================

/// A generation mode together with the level required to use it at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModeSpec {
    pub id: GenerationMode,
    pub name: &'static str,
    pub description: &'static str,
    pub minimum_level: SubscriptionLevel,
}

/// A selectable generation backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub minimum_level: SubscriptionLevel,
    pub allowed_modes: &'static [GenerationMode],
}

impl ModelSpec {
    pub fn supports(&self, mode: GenerationMode) -> bool {
        self.allowed_modes.contains(&mode)
    }

    pub fn available_to(&self, level: SubscriptionLevel) -> bool {
        level.at_least(self.minimum_level)
    }

    /// The model as an entry of the `modelId` select
    pub fn as_option(&self) -> ChoiceOption {
        ChoiceOption::new(self.id, self.name)
            .described(self.description)
            .free(self.minimum_level == Free)
            .allowed(self.minimum_level.and_above())
    }
}

// =============================================================================
// Parameters
// =============================================================================

/// Primitive type of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    String,
    Number,
    Select,
    Textarea,
}

/// Field-level validation rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl ValidationRule {
    pub const fn new() -> Self {
        Self {
            min_length: None,
            max_length: None,
            pattern: None,
            message: None,
        }
    }

    pub const fn min_length(self, min: usize) -> Self {
        Self {
            min_length: Some(min),
            ..self
        }
    }

    pub const fn max_length(self, max: usize) -> Self {
        Self {
            max_length: Some(max),
            ..self
        }
    }

    pub const fn pattern(self, pattern: &'static str) -> Self {
        Self {
            pattern: Some(pattern),
            ..self
        }
    }

    pub const fn message(self, message: &'static str) -> Self {
        Self {
            message: Some(message),
            ..self
        }
    }
}

/// A parameter is visible only when both the mode and the level are listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibilityCondition {
    pub modes: &'static [GenerationMode],
    pub levels: &'static [SubscriptionLevel],
}

impl VisibilityCondition {
    pub fn admits(&self, mode: GenerationMode, level: SubscriptionLevel) -> bool {
        self.modes.contains(&mode) && self.levels.contains(&level)
    }
}

/// Declaration of one generation form field
#[derive(Debug, Clone, Copy)]
pub struct ParameterConfig {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: ParameterKind,
    pub required: bool,
    pub default_value: &'static str,
    pub placeholder: Option<&'static str>,
    pub description: Option<&'static str>,
    /// Key under which the value is submitted
    pub request_key: &'static str,
    pub validation: Option<ValidationRule>,
    /// `None` means always visible (subject to `minimum_level`)
    pub visibility: Option<VisibilityCondition>,
    pub minimum_level: Option<SubscriptionLevel>,
    pub options: Option<OptionSource>,
    pub order: u32,
}

impl ParameterConfig {
    pub const fn new(
        id: &'static str,
        label: &'static str,
        kind: ParameterKind,
        order: u32,
    ) -> Self {
        Self {
            id,
            label,
            kind,
            required: false,
            default_value: "",
            placeholder: None,
            description: None,
            request_key: id,
            validation: None,
            visibility: None,
            minimum_level: None,
            options: None,
            order,
        }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn default_value(self, value: &'static str) -> Self {
        Self {
            default_value: value,
            ..self
        }
    }

    pub const fn placeholder(self, placeholder: &'static str) -> Self {
        Self {
            placeholder: Some(placeholder),
            ..self
        }
    }

    pub const fn described(self, description: &'static str) -> Self {
        Self {
            description: Some(description),
            ..self
        }
    }

    pub const fn validation(self, rule: ValidationRule) -> Self {
        Self {
            validation: Some(rule),
            ..self
        }
    }

    pub const fn visible_when(
        self,
        modes: &'static [GenerationMode],
        levels: &'static [SubscriptionLevel],
    ) -> Self {
        Self {
            visibility: Some(VisibilityCondition { modes, levels }),
            ..self
        }
    }

    pub const fn minimum_level(self, level: SubscriptionLevel) -> Self {
        Self {
            minimum_level: Some(level),
            ..self
        }
    }

    pub const fn options(self, source: OptionSource) -> Self {
        Self {
            options: Some(source),
            ..self
        }
    }

    /// Steps 1 and 2 of parameter resolution: the minimum-level gate, then the
    /// visibility condition. The gate wins even when `visibility` would admit.
    pub fn is_visible(&self, mode: GenerationMode, level: SubscriptionLevel) -> bool {
        if let Some(minimum) = self.minimum_level {
            if !level.at_least(minimum) {
                return false;
            }
        }
        self.visibility
            .map_or(true, |condition| condition.admits(mode, level))
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A complete set of modes, models and parameters.
///
/// [`Catalog::builtin`] is the shipped configuration; other catalogs are
/// mainly useful in tests.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    modes: &'static [ModeSpec],
    models: &'static [ModelSpec],
    parameters: &'static [ParameterConfig],
}

static BUILTIN: Catalog = Catalog::new(MODES, MODELS, PARAMETERS);

impl Catalog {
    pub const fn new(
        modes: &'static [ModeSpec],
        models: &'static [ModelSpec],
        parameters: &'static [ParameterConfig],
    ) -> Self {
        Self {
            modes,
            models,
            parameters,
        }
    }

    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn modes(&self) -> &'static [ModeSpec] {
        self.modes
    }

    pub fn models(&self) -> &'static [ModelSpec] {
        self.models
    }

    pub fn parameters(&self) -> &'static [ParameterConfig] {
        self.parameters
    }

    pub fn parameter(&self, id: &str) -> Option<&'static ParameterConfig> {
        self.parameters.iter().find(|param| param.id == id)
    }
}

// =============================================================================
// Shipped tables
// =============================================================================

/// Parameter ids of the shipped catalog
pub mod param {
    pub const MODEL: &str = "modelId";
    pub const NAME: &str = "musicName";
    pub const DESCRIPTION: &str = "musicDescription";
    pub const LYRICS: &str = "lyrics";
    pub const STYLE: &str = "musicStyle";
    pub const MOOD: &str = "mood";
    pub const VOCAL_TYPE: &str = "vocalType";
    pub const DURATION: &str = "duration";
    pub const TEMPO: &str = "tempo";
}

const EVERY_LEVEL: &[SubscriptionLevel] = &[Free, Standard, Enterprise];
const PAID_LEVELS: &[SubscriptionLevel] = &[Standard, Enterprise];
const ENTERPRISE_ONLY: &[SubscriptionLevel] = &[Enterprise];
const EVERY_MODE: &[GenerationMode] = &[Inspiration, Custom, Instrumental];

pub const MODES: &[ModeSpec] = &[
    ModeSpec {
        id: Inspiration,
        name: "Inspiration",
        description: "Generate music from a short description of an idea",
        minimum_level: Free,
    },
    ModeSpec {
        id: Custom,
        name: "Custom",
        description: "Full control over lyrics and every music parameter",
        minimum_level: Standard,
    },
    ModeSpec {
        id: Instrumental,
        name: "Instrumental",
        description: "Generate music without vocals",
        minimum_level: Standard,
    },
];

pub const MODELS: &[ModelSpec] = &[
    ModelSpec {
        id: "Chirp v4.0",
        name: "Chirp v4.0",
        description: "Catchy pop melodies for short videos and social media",
        minimum_level: Free,
        allowed_modes: EVERY_MODE,
    },
    ModelSpec {
        id: "Chirp v4.5",
        name: "Chirp v4.5",
        description: "Classical and orchestral pieces for film scores and commercial work",
        minimum_level: Standard,
        allowed_modes: EVERY_MODE,
    },
    ModelSpec {
        id: "Chirp v5.0",
        name: "Chirp v5.0",
        description: "Authentic jazz with a strong improvisational feel",
        minimum_level: Standard,
        allowed_modes: EVERY_MODE,
    },
    ModelSpec {
        id: "Chirp v5.5",
        name: "Chirp v5.5",
        description: "Warm, earthy country and folk",
        minimum_level: Enterprise,
        allowed_modes: EVERY_MODE,
    },
];

pub const STYLES: &[ChoiceOption] = &[
    ChoiceOption::new("pop", "Pop").allowed(EVERY_LEVEL),
    ChoiceOption::new("electronic", "Electronic").allowed(EVERY_LEVEL),
    ChoiceOption::new("rock", "Rock").allowed(PAID_LEVELS),
    ChoiceOption::new("jazz", "Jazz").allowed(PAID_LEVELS),
    ChoiceOption::new("classical", "Classical").allowed(ENTERPRISE_ONLY),
    ChoiceOption::new("country", "Country").allowed(ENTERPRISE_ONLY),
    ChoiceOption::new("folk", "Folk").allowed(ENTERPRISE_ONLY),
];

pub const MOODS: &[ChoiceOption] = &[
    ChoiceOption::new("happy", "Happy"),
    ChoiceOption::new("sad", "Sad"),
    ChoiceOption::new("exciting", "Exciting"),
    ChoiceOption::new("calm", "Calm"),
    ChoiceOption::new("mysterious", "Mysterious"),
    ChoiceOption::new("inspiring", "Inspiring"),
    ChoiceOption::new("romantic", "Romantic"),
];

pub const TEMPOS: &[ChoiceOption] = &[
    ChoiceOption::new("slow", "Slow").bpm("60-90"),
    ChoiceOption::new("medium", "Medium").bpm("90-120"),
    ChoiceOption::new("fast", "Fast").bpm("120-160"),
];

// Every duration is flagged `free`; the allow-list is what gates them.
pub const DURATIONS: &[ChoiceOption] = &[
    ChoiceOption::new("15", "15 seconds")
        .free(true)
        .allowed(EVERY_LEVEL),
    ChoiceOption::new("30", "30 seconds")
        .free(true)
        .allowed(PAID_LEVELS),
    ChoiceOption::new("60", "60 seconds")
        .free(true)
        .allowed(PAID_LEVELS),
    ChoiceOption::new("120", "120 seconds")
        .free(true)
        .allowed(ENTERPRISE_ONLY),
    ChoiceOption::new("180", "180 seconds")
        .free(true)
        .allowed(ENTERPRISE_ONLY),
];

pub const VOICES: &[ChoiceOption] = &[
    ChoiceOption::new("random", "Random"),
    ChoiceOption::new("male", "Male"),
    ChoiceOption::new("female", "Female"),
];

fn model_options(level: SubscriptionLevel) -> anyhow::Result<Vec<ChoiceOption>> {
    Ok(MODELS
        .iter()
        .filter(|model| model.available_to(level))
        .map(ModelSpec::as_option)
        .collect())
}

pub const PARAMETERS: &[ParameterConfig] = &[
    ParameterConfig::new(param::MODEL, "Model", ParameterKind::Select, 1)
        .required()
        .default_value("Chirp v4.0")
        .visible_when(EVERY_MODE, EVERY_LEVEL)
        .options(OptionSource::Computed(model_options)),
    ParameterConfig::new(param::NAME, "Song title", ParameterKind::String, 2)
        .required()
        .placeholder("Give your music a name...")
        .visible_when(EVERY_MODE, EVERY_LEVEL)
        .validation(
            ValidationRule::new()
                .min_length(1)
                .max_length(100)
                .message("Please enter a valid song title"),
        ),
    ParameterConfig::new(
        param::DESCRIPTION,
        "Music description",
        ParameterKind::Textarea,
        3,
    )
    .required()
    .placeholder("Describe the style, emotion or scene you want...")
    .visible_when(&[Inspiration, Instrumental], EVERY_LEVEL)
    .validation(
        ValidationRule::new()
            .min_length(5)
            .message("Please describe the music in more detail (at least 5 characters)"),
    ),
    ParameterConfig::new(param::LYRICS, "Lyrics", ParameterKind::Textarea, 4)
        .required()
        .placeholder("Enter your lyrics...")
        .visible_when(&[Custom], EVERY_LEVEL)
        .validation(
            ValidationRule::new()
                .min_length(5)
                .message("Please enter valid lyrics (at least 5 characters)"),
        ),
    ParameterConfig::new(param::STYLE, "Music style", ParameterKind::Select, 5)
        .required()
        .default_value("pop")
        .options(OptionSource::Fixed(STYLES)),
    ParameterConfig::new(param::MOOD, "Mood", ParameterKind::Select, 6)
        .required()
        .default_value("happy")
        .options(OptionSource::Fixed(MOODS)),
    ParameterConfig::new(param::VOCAL_TYPE, "Vocal type", ParameterKind::Select, 7)
        .required()
        .default_value("random")
        .visible_when(&[Inspiration, Custom], EVERY_LEVEL)
        .options(OptionSource::Fixed(VOICES)),
    ParameterConfig::new(param::DURATION, "Duration", ParameterKind::Select, 8)
        .required()
        .default_value("15")
        .described("Length of the generated track in seconds")
        .options(OptionSource::Fixed(DURATIONS)),
    ParameterConfig::new(param::TEMPO, "Tempo", ParameterKind::Select, 9)
        .required()
        .default_value("medium")
        .options(OptionSource::Fixed(TEMPOS)),
];
