use serde::{Deserialize, Serialize};
use tutorial_web::binding::{Field, Schema};

/// The request body of `POST /items`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Item {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub tax: Option<f64>,
}

impl Schema for Item {
    const FIELDS: &'static [Field] = &[
        Field::body("name"),
        Field::body("description").optional(),
        Field::body("price").float(),
        Field::body("tax").float().optional(),
    ];
}

/// Machine learning model names, the only values `/models/{model_name}` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelName {
    Alexnet,
    Resnet,
    Lenet,
}

impl ModelName {
    pub const NAMES: &'static [&'static str] = &["alexnet", "resnet", "lenet"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelName::Alexnet => "alexnet",
            ModelName::Resnet => "resnet",
            ModelName::Lenet => "lenet",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ModelName::Alexnet => "Deep Learning Model!",
            ModelName::Lenet => "LeCNN all the images",
            ModelName::Resnet => "Have some residuals",
        }
    }
}

/// Documentation tags grouping the routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tags {
    FirstSteps,
    PathParameters,
    QueryParameters,
    RequestBody,
    Validations,
}

impl Tags {
    /// The tag of the very first routes, kept apart from the tutorial sections.
    pub const TESTING: &'static str = "testing";

    pub fn as_str(&self) -> &'static str {
        match self {
            Tags::FirstSteps => "First Steps",
            Tags::PathParameters => "Path Parameters",
            Tags::QueryParameters => "Query Parameters",
            Tags::RequestBody => "Request Body",
            Tags::Validations => "Validations",
        }
    }
}
