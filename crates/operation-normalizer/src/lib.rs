//! # Operation Normalizer
//!
//! Produces the canonical text of a single GraphQL operation, so that two documents that only
//! differ in their presentation identify the same operation. This is achieved by doing the
//! following steps:
//!
//! - Keep only the requested operation, dropping the other operations of the document
//! - Remove all fragments not used, directly or transitively, by that operation
//! - Remove all comments
//! - Order fragment definitions alphabetically, before the operation
//! - Parse and render, removing extra whitespace and other stylistic things
//!
//! Aliases, argument values and the order of selections are kept as they are: they shape the
//! response a client decodes, so two operations differing there are different operations.

#![deny(missing_docs)]

mod fragments;


use std::{cmp::Ordering, collections::HashSet, fmt};

use graphql_parser::query::{Definition, OperationDefinition};

/// The root type an operation is executed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    /// `query` or an anonymous selection set.
    Query,
    /// `mutation`
    Mutation,
    /// `subscription`
    Subscription,
}

impl OperationType {
    /// The GraphQL keyword of this operation type.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Query => "query",
            OperationType::Mutation => "mutation",
            OperationType::Subscription => "subscription",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single operation in its canonical text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedOperation {
    /// Canonical document text: used fragments first, then the operation.
    pub document: String,
    /// Name of the operation, `None` for anonymous operations.
    pub name: Option<String>,
    /// Type of the operation.
    pub ty: OperationType,
}

/// With the given input, returns the canonical text of one operation.
///
/// - If the incoming operation is named, the source must have an operation with a given name.
/// - For unnamed operations, the source must include only a single operation.
/// - The source must parse as an executable document.
pub fn normalize(source_text: &str, operation_name: Option<&str>) -> anyhow::Result<NormalizedOperation> {
    let mut document = graphql_parser::parse_query::<&str>(source_text)?;

    if let Some(operation_name) = operation_name {
        document.definitions.retain(|definition| match definition {
            Definition::Operation(operation) => operation_name_of(operation) == Some(operation_name),
            Definition::Fragment(_) => true,
        });
    }

    let mut operations = document
        .definitions
        .iter()
        .filter_map(|definition| match definition {
            Definition::Operation(operation) => Some(operation),
            Definition::Fragment(_) => None,
        });

    let Some(operation) = operations.next() else {
        anyhow::bail!("the normalized document is empty (meaning we couldn't find an operation with the given name)");
    };

    if operations.next().is_some() {
        anyhow::bail!("the document contains several operations, an operation name is required");
    }

    let name = operation_name_of(operation).map(str::to_owned);
    let ty = operation_type_of(operation);
    let used_fragments = fragments::collect_used(&document, operation);

    document.definitions.retain(|definition| match definition {
        Definition::Fragment(fragment) => used_fragments.contains(fragment.name),
        Definition::Operation(_) => true,
    });

    check_spreads_are_defined(&document, &used_fragments)?;

    document.definitions.sort_by(|a, b| match (a, b) {
        (Definition::Operation(_), Definition::Fragment(_)) => Ordering::Greater,
        (Definition::Fragment(_), Definition::Operation(_)) => Ordering::Less,
        (Definition::Fragment(a), Definition::Fragment(b)) => a.name.cmp(b.name),
        // only one operation is left at this point
        (Definition::Operation(_), Definition::Operation(_)) => Ordering::Equal,
    });

    Ok(NormalizedOperation {
        document: document.to_string(),
        name,
        ty,
    })
}

fn operation_name_of<'a>(operation: &OperationDefinition<'a, &'a str>) -> Option<&'a str> {
    match operation {
        OperationDefinition::SelectionSet(_) => None,
        OperationDefinition::Query(query) => query.name,
        OperationDefinition::Mutation(mutation) => mutation.name,
        OperationDefinition::Subscription(subscription) => subscription.name,
    }
}

fn operation_type_of<'a>(operation: &OperationDefinition<'a, &'a str>) -> OperationType {
    match operation {
        OperationDefinition::SelectionSet(_) | OperationDefinition::Query(_) => OperationType::Query,
        OperationDefinition::Mutation(_) => OperationType::Mutation,
        OperationDefinition::Subscription(_) => OperationType::Subscription,
    }
}

fn check_spreads_are_defined<'a>(
    document: &graphql_parser::query::Document<'a, &'a str>,
    used_fragments: &HashSet<&'a str>,
) -> anyhow::Result<()> {
    let defined = document
        .definitions
        .iter()
        .filter_map(|definition| match definition {
            Definition::Fragment(fragment) => Some(fragment.name),
            Definition::Operation(_) => None,
        })
        .collect::<HashSet<_>>();

    let mut missing = used_fragments.difference(&defined).copied().collect::<Vec<_>>();
    missing.sort_unstable();

    if let Some(name) = missing.first() {
        anyhow::bail!("unknown fragment \"{name}\"");
    }

    Ok(())
}
