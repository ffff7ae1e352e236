use serde_json::Value;

/// Where a field is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Path,
    Query,
    Body,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Path => "path",
            Location::Query => "query",
            Location::Body => "body",
        }
    }
}

/// The type a raw value is coerced into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kind {
    Str,
    Int,
    Float,
    Bool,
    /// every occurrence of a repeated query key, in order
    StrList,
    /// a string restricted to a closed set of literals
    Enum(&'static [&'static str]),
}

impl Kind {
    /// The JSON schema type name of this kind.
    pub fn json_type(&self) -> &'static str {
        match self {
            Kind::Str | Kind::Enum(_) => "string",
            Kind::Int => "integer",
            Kind::Float => "number",
            Kind::Bool => "boolean",
            Kind::StrList => "array",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Presence {
    Required,
    Optional,
    Default(DefaultValue),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Int(i64),
    Bool(bool),
}

impl DefaultValue {
    pub fn to_json(self) -> Value {
        match self {
            DefaultValue::Int(i) => Value::from(i),
            DefaultValue::Bool(b) => Value::Bool(b),
        }
    }
}

/// Declares one bindable parameter: its name, where it comes from, its type and its constraints.
///
/// Fields are built with `const` builder calls so a whole parameter list can live in a `const`:
///
/// ```
/// use tutorial_web::binding::Field;
///
/// const FIELDS: &[Field] = &[
///     Field::path("item_id").int(),
///     Field::query("q").alias("item-query").optional().min_length(3),
///     Field::query("short").bool().default_bool(false),
/// ];
/// assert_eq!(FIELDS[1].wire_name(), "item-query");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    name: &'static str,
    alias: Option<&'static str>,
    location: Location,
    kind: Kind,
    presence: Presence,
    min_length: Option<usize>,
    max_length: Option<usize>,
}

impl Field {
    const fn new(name: &'static str, location: Location) -> Self {
        Self {
            name,
            alias: None,
            location,
            kind: Kind::Str,
            presence: Presence::Required,
            min_length: None,
            max_length: None,
        }
    }

    /// A path segment, always required.
    pub const fn path(name: &'static str) -> Self {
        Self::new(name, Location::Path)
    }

    pub const fn query(name: &'static str) -> Self {
        Self::new(name, Location::Query)
    }

    /// A member of the JSON object request body.
    pub const fn body(name: &'static str) -> Self {
        Self::new(name, Location::Body)
    }

    pub const fn int(self) -> Self {
        Self { kind: Kind::Int, ..self }
    }

    pub const fn float(self) -> Self {
        Self { kind: Kind::Float, ..self }
    }

    pub const fn bool(self) -> Self {
        Self { kind: Kind::Bool, ..self }
    }

    pub const fn list(self) -> Self {
        Self { kind: Kind::StrList, ..self }
    }

    pub const fn one_of(self, values: &'static [&'static str]) -> Self {
        Self { kind: Kind::Enum(values), ..self }
    }

    pub const fn optional(self) -> Self {
        Self { presence: Presence::Optional, ..self }
    }

    pub const fn default_int(self, value: i64) -> Self {
        Self { presence: Presence::Default(DefaultValue::Int(value)), ..self }
    }

    pub const fn default_bool(self, value: bool) -> Self {
        Self { presence: Presence::Default(DefaultValue::Bool(value)), ..self }
    }

    /// Reads the field under another name than the one it is bound to.
    pub const fn alias(self, alias: &'static str) -> Self {
        Self { alias: Some(alias), ..self }
    }

    pub const fn min_length(self, min_length: usize) -> Self {
        Self { min_length: Some(min_length), ..self }
    }

    pub const fn max_length(self, max_length: usize) -> Self {
        Self { max_length: Some(max_length), ..self }
    }

    /// The name the bound value is stored under.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The name the value is read from on the wire.
    pub fn wire_name(&self) -> &'static str {
        self.alias.unwrap_or(self.name)
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn is_required(&self) -> bool {
        matches!(self.presence, Presence::Required)
    }

    pub fn min_len(&self) -> Option<usize> {
        self.min_length
    }

    pub fn max_len(&self) -> Option<usize> {
        self.max_length
    }
}
