#![allow(unused_crate_dependencies)]

use std::sync::Arc;

use chrono::NaiveDate;
use graphql_operation_codec::{
    descriptor::{ArgumentValue, Descriptors, FieldDescriptor, ScalarType},
    input::{InputObject, InputValue, Presence, Variables},
    scalars::{CustomScalarValue, ScalarRegistry},
    OperationCodec, OperationDescriptor, PersistedQueryMode, WireMap, WireValue,
};
use rstest::rstest;

const CREATE_REVIEW: &str = r#"
    mutation CreateReview($episode: Episode!, $review: ReviewInput!) {
      createReview(episode: $episode, review: $review) { stars commentary }
    }
"#;

struct ReviewInput {
    stars: i32,
    commentary: Presence<String>,
    favorite_color: Presence<ColorInput>,
    watched_on: Presence<NaiveDate>,
}

struct ColorInput {
    red: i32,
    green: i32,
    blue: i32,
}

struct CreateReviewVariables {
    episode: &'static str,
    review: ReviewInput,
}

impl ColorInput {
    fn to_input(&self) -> InputObject {
        InputObject::new()
            .field("red", self.red)
            .field("green", self.green)
            .field("blue", self.blue)
    }
}

impl ReviewInput {
    fn to_input(&self) -> InputObject {
        InputObject::new()
            .field("stars", self.stars)
            .optional("commentary", self.commentary.as_ref())
            .optional("favoriteColor", self.favorite_color.as_ref().map(ColorInput::to_input))
            .optional(
                "watchedOn",
                self.watched_on.map(|date| CustomScalarValue::new("AWSDate", date)),
            )
    }
}

impl Variables for CreateReviewVariables {
    fn to_input(&self) -> InputObject {
        InputObject::new()
            .field("episode", InputValue::enum_value(self.episode))
            .field("review", self.review.to_input())
    }
}

fn codec() -> OperationCodec {
    let mut builder = Descriptors::builder();
    let review = builder.selection_set([
        FieldDescriptor::scalar("stars", ScalarType::Int),
        FieldDescriptor::scalar("commentary", ScalarType::String).nullable(),
    ]);
    let root = builder.selection_set([FieldDescriptor::object("createReview", review)
        .nullable()
        .argument("episode", ArgumentValue::Variable("episode".into()))
        .argument("review", ArgumentValue::Variable("review".into()))]);
    let operation = OperationDescriptor::new(CREATE_REVIEW, None, root).unwrap();

    OperationCodec::new(
        operation,
        Arc::new(builder.build().unwrap()),
        Arc::new(ScalarRegistry::with_aws_scalars()),
    )
    .unwrap()
}

fn review(commentary: Presence<String>) -> CreateReviewVariables {
    CreateReviewVariables {
        episode: "JEDI",
        review: ReviewInput {
            stars: 5,
            commentary,
            favorite_color: Presence::Absent,
            watched_on: Presence::Absent,
        },
    }
}

#[rstest]
#[case::absent(Presence::Absent, None)]
#[case::null(Presence::Null, Some(WireValue::Null))]
#[case::value(Presence::Value("Great!".to_string()), Some(WireValue::from("Great!")))]
fn presence_of_optional_fields(#[case] commentary: Presence<String>, #[case] expected: Option<WireValue>) {
    let variables = codec().encode_variables(&review(commentary));

    let review = variables.get("review").unwrap();
    assert_eq!(review.get("commentary").cloned(), expected);
    assert_eq!(review.get("stars"), Some(&WireValue::from(5)));
}

#[test]
fn nested_inputs_and_custom_scalars() {
    let variables = CreateReviewVariables {
        episode: "EMPIRE",
        review: ReviewInput {
            stars: 4,
            commentary: Presence::Null,
            favorite_color: Presence::Value(ColorInput {
                red: 255,
                green: 0,
                blue: 0,
            }),
            watched_on: Presence::Value(NaiveDate::from_ymd_opt(1980, 5, 21).unwrap()),
        },
    };

    let encoded = codec().encode_variables(&variables);

    insta::assert_json_snapshot!(encoded, @r###"
    {
      "episode": "EMPIRE",
      "review": {
        "stars": 4,
        "commentary": null,
        "favoriteColor": {
          "red": 255,
          "green": 0,
          "blue": 0
        },
        "watchedOn": "1980-05-21"
      }
    }
    "###);
}

#[test]
fn encoded_keys_are_the_defined_ones() {
    let variables = review(Presence::Null);
    let input = variables.to_input();

    let encoded = codec().encode_variables(&variables);

    let Some(InputValue::Object(review)) = input.get("review").and_then(|field| match field {
        graphql_operation_codec::input::InputField::Required(value) => Some(value),
        graphql_operation_codec::input::InputField::Optional(_) => None,
    }) else {
        unreachable!()
    };
    let defined = review
        .fields()
        .filter(|(_, field)| {
            !matches!(
                field,
                graphql_operation_codec::input::InputField::Optional(Presence::Absent)
            )
        })
        .map(|(name, _)| name)
        .collect::<Vec<_>>();
    let sent = encoded
        .get("review")
        .and_then(WireValue::as_map)
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect::<Vec<_>>();

    assert_eq!(defined, sent);
    assert_eq!(sent, vec!["stars", "commentary"]);
}

#[test]
fn arguments_resolve_against_encoded_variables() {
    let codec = codec();
    let variables = codec.encode_variables(&review(Presence::Absent));

    let root = codec.operation().root();
    let field = &codec.descriptors().fields(root)[0];

    insta::assert_json_snapshot!(field.resolve_arguments(&variables), @r###"
    {
      "episode": "JEDI",
      "review": {
        "stars": 5
      }
    }
    "###);
}

#[test]
fn request_body() {
    let codec = codec();

    let body = codec.request(&review(Presence::Absent), PersistedQueryMode::HashOnly);

    assert_eq!(body.get("operationName").and_then(WireValue::as_str), Some("CreateReview"));
    assert!(body.get("query").is_none());
    assert_eq!(
        body.get("extensions")
            .and_then(|extensions| extensions.get("persistedQuery")?.get("sha256Hash")?.as_str()),
        Some(codec.operation().content_hash())
    );

    let empty = codec.request(&(), PersistedQueryMode::Disabled);
    assert_eq!(empty.get("variables"), Some(&WireValue::Map(WireMap::new())));
    assert_eq!(
        empty.get("query").and_then(WireValue::as_str),
        Some(codec.operation().document_text())
    );
}
