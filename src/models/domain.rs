use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A short wire code for an enumerated preference value.
///
/// Preference sets travel as comma-joined codes (`"s,m,l,xl"`) but are held
/// as typed sets everywhere else.
pub trait Token: Sized + Copy + Ord + 'static {
    /// Every value, in canonical order
    const ALL: &'static [Self];

    fn code(self) -> &'static str;

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.code() == code)
    }
}

/// Parse a comma-joined token list. Unknown tokens and blanks are dropped.
pub fn parse_tokens<T: Token>(raw: &str) -> BTreeSet<T> {
    raw.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .filter_map(|code| {
            let token = T::from_code(code);
            if token.is_none() {
                tracing::debug!("Discarding unknown preference token: {:?}", code);
            }
            token
        })
        .collect()
}

/// Join a token set back into its canonical comma-joined form
pub fn join_tokens<T: Token>(tokens: &BTreeSet<T>) -> String {
    tokens.iter().map(|t| t.code()).collect::<Vec<_>>().join(",")
}

/// Dog gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
}

impl Token for Gender {
    const ALL: &'static [Self] = &[Gender::Male, Gender::Female];

    fn code(self) -> &'static str {
        match self {
            Gender::Male => "m",
            Gender::Female => "f",
        }
    }
}

/// Dog size
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Size {
    #[serde(rename = "s")]
    Small,
    #[serde(rename = "m")]
    Medium,
    #[serde(rename = "l")]
    Large,
    #[serde(rename = "xl")]
    ExtraLarge,
}

impl Token for Size {
    const ALL: &'static [Self] = &[Size::Small, Size::Medium, Size::Large, Size::ExtraLarge];

    fn code(self) -> &'static str {
        match self {
            Size::Small => "s",
            Size::Medium => "m",
            Size::Large => "l",
            Size::ExtraLarge => "xl",
        }
    }
}

/// Named age range; the month intervals live in `core::age`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeBucket {
    Baby,
    Young,
    Adult,
    Senior,
}

impl Token for AgeBucket {
    const ALL: &'static [Self] = &[
        AgeBucket::Baby,
        AgeBucket::Young,
        AgeBucket::Adult,
        AgeBucket::Senior,
    ];

    fn code(self) -> &'static str {
        match self {
            AgeBucket::Baby => "b",
            AgeBucket::Young => "y",
            AgeBucket::Adult => "a",
            AgeBucket::Senior => "s",
        }
    }
}

/// Error returned when a stored or supplied code is not a known token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownToken(pub String);

impl fmt::Display for UnknownToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown token: {:?}", self.0)
    }
}

impl std::error::Error for UnknownToken {}

impl FromStr for Gender {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownToken(s.to_string()))
    }
}

impl FromStr for Size {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownToken(s.to_string()))
    }
}

/// Dog profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub id: i64,
    pub name: String,
    pub image_filename: String,
    pub breed: String,
    /// Age in months
    pub age: i32,
    pub gender: Gender,
    pub size: Size,
    pub sterilized: bool,
}

/// Fields of a dog before it has an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDog {
    pub name: String,
    pub image_filename: String,
    pub breed: String,
    pub age: i32,
    pub gender: Gender,
    pub size: Size,
    pub sterilized: bool,
}

/// Partial dog update; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DogChanges {
    pub name: Option<String>,
    pub image_filename: Option<String>,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub size: Option<Size>,
    pub sterilized: Option<bool>,
}

/// A stored swipe decision. Undecided is the absence of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "swipe_status", rename_all = "lowercase")]
pub enum SwipeStatus {
    #[serde(rename = "l")]
    Liked,
    #[serde(rename = "d")]
    Disliked,
}

/// Swipe status as it appears in request paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeFilter {
    Liked,
    Disliked,
    Undecided,
}

impl SwipeFilter {
    /// The record this filter stores, if any
    pub fn status(self) -> Option<SwipeStatus> {
        match self {
            SwipeFilter::Liked => Some(SwipeStatus::Liked),
            SwipeFilter::Disliked => Some(SwipeStatus::Disliked),
            SwipeFilter::Undecided => None,
        }
    }

    /// Status code echoed to clients: `l`, `d`, or empty for undecided
    pub fn code(self) -> &'static str {
        match self {
            SwipeFilter::Liked => "l",
            SwipeFilter::Disliked => "d",
            SwipeFilter::Undecided => "",
        }
    }
}

impl From<Option<SwipeStatus>> for SwipeFilter {
    fn from(value: Option<SwipeStatus>) -> Self {
        match value {
            Some(SwipeStatus::Liked) => SwipeFilter::Liked,
            Some(SwipeStatus::Disliked) => SwipeFilter::Disliked,
            None => SwipeFilter::Undecided,
        }
    }
}

/// Per-user filter settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub id: i64,
    pub user_id: i64,
    pub age: BTreeSet<AgeBucket>,
    pub gender: BTreeSet<Gender>,
    pub size: BTreeSet<Size>,
}

impl Preferences {
    /// All-inclusive preferences assigned to every new user
    pub fn defaults(id: i64, user_id: i64) -> Self {
        Self {
            id,
            user_id,
            age: AgeBucket::ALL.iter().copied().collect(),
            gender: Gender::ALL.iter().copied().collect(),
            size: Size::ALL.iter().copied().collect(),
        }
    }
}

/// Registered user, without credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}
