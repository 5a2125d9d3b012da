use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use tallysheet_core::{DomainError, DomainResult, Entity, SeqId};

use crate::numfmt::{self, NumberFormat};
use crate::totals;

/// Row handle, decoupled from wherever the row happens to be rendered.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(pub SeqId);

impl LineItemId {
    pub fn new(id: SeqId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for LineItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::str::FromStr for LineItemId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<SeqId>().map(Self)
    }
}

/// One shipment/article row.
///
/// The amount is never stored; see [`LineItem::amount`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    id: LineItemId,
    pub placement_date: Option<NaiveDate>,
    pub placement_group: String,
    pub pass_date: Option<NaiveDate>,
    pub pass_number: String,
    pub article: String,
    pub pieces: i64,
    /// Area, typically square feet.
    pub area: f64,
    /// Currency per unit of area.
    pub rate: f64,
}

impl LineItem {
    pub(crate) fn from_draft(id: LineItemId, draft: LineItemDraft) -> Self {
        Self {
            id,
            placement_date: draft.placement_date,
            placement_group: draft.placement_group.unwrap_or_default(),
            pass_date: draft.pass_date,
            pass_number: draft.pass_number.unwrap_or_default(),
            article: draft.article.unwrap_or_default(),
            pieces: draft.pieces.unwrap_or(0),
            area: draft.area.unwrap_or(0.0),
            rate: draft.rate.unwrap_or(0.0),
        }
    }

    /// area × rate, computed fresh on every call.
    pub fn amount(&self) -> f64 {
        totals::amount(self.area, self.rate)
    }

    /// Read-only amount cell text.
    pub fn amount_display(&self, fmt: &NumberFormat) -> String {
        fmt.format(self.amount(), 2)
    }

    /// Overwrite the cell named by `value`.
    pub fn set(&mut self, value: FieldValue) {
        match value {
            FieldValue::PlacementDate(v) => self.placement_date = v,
            FieldValue::PlacementGroup(v) => self.placement_group = v,
            FieldValue::PassDate(v) => self.pass_date = v,
            FieldValue::PassNumber(v) => self.pass_number = v,
            FieldValue::Article(v) => self.article = v,
            FieldValue::Pieces(v) => self.pieces = v,
            FieldValue::Area(v) => self.area = v,
            FieldValue::Rate(v) => self.rate = v,
        }
    }
}

impl Entity for LineItem {
    type Id = LineItemId;

    fn id(&self) -> LineItemId {
        self.id
    }
}

/// Initial values for a new row. Absent fields default to empty/zero.
///
/// Field aliases accept the short keys the browser sheet used
/// (`plcDate`, `sqft`, ...).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItemDraft {
    #[serde(alias = "plcDate", deserialize_with = "lenient_date")]
    pub placement_date: Option<NaiveDate>,
    #[serde(alias = "plcGp")]
    pub placement_group: Option<String>,
    #[serde(alias = "pgDate", deserialize_with = "lenient_date")]
    pub pass_date: Option<NaiveDate>,
    #[serde(alias = "pgNo")]
    pub pass_number: Option<String>,
    pub article: Option<String>,
    #[serde(alias = "pcs", deserialize_with = "lenient_pieces")]
    pub pieces: Option<i64>,
    #[serde(alias = "sqft", deserialize_with = "lenient_number")]
    pub area: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub rate: Option<f64>,
}

impl LineItemDraft {
    /// Draft with only the numeric cells filled in.
    pub fn measured(pieces: i64, area: f64, rate: f64) -> Self {
        Self {
            pieces: Some(pieces),
            area: Some(area),
            rate: Some(rate),
            ..Self::default()
        }
    }

    pub fn with_article(mut self, article: impl Into<String>) -> Self {
        self.article = Some(article.into());
        self
    }

    /// Run the numeric cells through `policy`.
    pub fn sanitized(mut self, policy: NegativeInput) -> DomainResult<Self> {
        if let Some(pieces) = self.pieces {
            self.pieces = Some(policy.apply(Field::Pieces, pieces as f64)? as i64);
        }
        if let Some(area) = self.area {
            self.area = Some(policy.apply(Field::Area, area)?);
        }
        if let Some(rate) = self.rate {
            self.rate = Some(policy.apply(Field::Rate, rate)?);
        }
        Ok(self)
    }
}

/// Dates arrive as whatever a date input held; anything unparsable is "no date".
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

/// A numeric cell as it arrived: a JSON number, or whatever text the input held.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumericCell {
    Number(f64),
    Text(String),
}

impl NumericCell {
    fn value(self) -> f64 {
        match self {
            NumericCell::Number(n) => n,
            NumericCell::Text(raw) => numfmt::parse(&raw),
        }
    }
}

/// Numbers may arrive as text (`"1,250.75"`); garbage becomes zero.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<NumericCell>::deserialize(deserializer)?.map(NumericCell::value))
}

fn lenient_pieces<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.map(round_pieces))
}

/// Nearest whole piece.
fn round_pieces(value: f64) -> i64 {
    value.round() as i64
}

/// Parse an ISO `YYYY-MM-DD` date; empty or malformed input is `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Editable cells of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    PlacementDate,
    PlacementGroup,
    PassDate,
    PassNumber,
    Article,
    Pieces,
    Area,
    Rate,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::PlacementDate,
        Field::PlacementGroup,
        Field::PassDate,
        Field::PassNumber,
        Field::Article,
        Field::Pieces,
        Field::Area,
        Field::Rate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::PlacementDate => "placement_date",
            Field::PlacementGroup => "placement_group",
            Field::PassDate => "pass_date",
            Field::PassNumber => "pass_number",
            Field::Article => "article",
            Field::Pieces => "pieces",
            Field::Area => "area",
            Field::Rate => "rate",
        }
    }

    /// Whether edits to this cell change the totals.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Field::Pieces | Field::Area | Field::Rate)
    }

    /// Turn raw cell text into a typed value.
    ///
    /// Numbers go through [`numfmt::parse`] (garbage becomes zero) and then
    /// through `policy`. Pieces are rounded to the nearest whole piece.
    pub fn parse_value(self, raw: &str, policy: NegativeInput) -> DomainResult<FieldValue> {
        let value = match self {
            Field::PlacementDate => FieldValue::PlacementDate(parse_date(raw)),
            Field::PlacementGroup => FieldValue::PlacementGroup(raw.to_string()),
            Field::PassDate => FieldValue::PassDate(parse_date(raw)),
            Field::PassNumber => FieldValue::PassNumber(raw.to_string()),
            Field::Article => FieldValue::Article(raw.to_string()),
            Field::Pieces => {
                let pieces = round_pieces(numfmt::parse(raw));
                FieldValue::Pieces(policy.apply(self, pieces as f64)? as i64)
            }
            Field::Area => FieldValue::Area(policy.apply(self, numfmt::parse(raw))?),
            Field::Rate => FieldValue::Rate(policy.apply(self, numfmt::parse(raw))?),
        };
        Ok(value)
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Field {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s.trim() {
            "placement_date" | "plc-date" => Field::PlacementDate,
            "placement_group" | "plc-gp" => Field::PlacementGroup,
            "pass_date" | "pg-date" => Field::PassDate,
            "pass_number" | "pg-no" => Field::PassNumber,
            "article" => Field::Article,
            "pieces" | "pcs" => Field::Pieces,
            "area" | "sqft" => Field::Area,
            "rate" => Field::Rate,
            other => return Err(DomainError::validation(format!("unknown field: {other}"))),
        };
        Ok(field)
    }
}

/// A parsed cell value, tagged with the cell it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    PlacementDate(Option<NaiveDate>),
    PlacementGroup(String),
    PassDate(Option<NaiveDate>),
    PassNumber(String),
    Article(String),
    Pieces(i64),
    Area(f64),
    Rate(f64),
}

impl FieldValue {
    pub fn field(&self) -> Field {
        match self {
            FieldValue::PlacementDate(_) => Field::PlacementDate,
            FieldValue::PlacementGroup(_) => Field::PlacementGroup,
            FieldValue::PassDate(_) => Field::PassDate,
            FieldValue::PassNumber(_) => Field::PassNumber,
            FieldValue::Article(_) => Field::Article,
            FieldValue::Pieces(_) => Field::Pieces,
            FieldValue::Area(_) => Field::Area,
            FieldValue::Rate(_) => Field::Rate,
        }
    }
}

/// What to do with a negative number typed into a numeric cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegativeInput {
    /// Keep it; credit and return lines produce negative totals.
    #[default]
    Permit,
    /// Replace it with zero.
    Clamp,
    /// Refuse the edit.
    Reject,
}

impl NegativeInput {
    pub fn as_str(&self) -> &'static str {
        match self {
            NegativeInput::Permit => "permit",
            NegativeInput::Clamp => "clamp",
            NegativeInput::Reject => "reject",
        }
    }

    /// Apply the policy to a value destined for `what` (a field or the tax rate).
    pub fn apply(self, what: impl core::fmt::Display, value: f64) -> DomainResult<f64> {
        if value >= 0.0 || value.is_nan() {
            return Ok(value);
        }
        match self {
            NegativeInput::Permit => Ok(value),
            NegativeInput::Clamp => Ok(0.0),
            NegativeInput::Reject => Err(DomainError::validation(format!(
                "{what} must not be negative (got {value})"
            ))),
        }
    }
}

impl core::str::FromStr for NegativeInput {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permit" => Ok(NegativeInput::Permit),
            "clamp" => Ok(NegativeInput::Clamp),
            "reject" => Ok(NegativeInput::Reject),
            other => Err(DomainError::validation(format!(
                "unknown negative input policy: {other}"
            ))),
        }
    }
}
