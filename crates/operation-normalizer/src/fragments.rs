use std::collections::{HashMap, HashSet};

use graphql_parser::query::{Definition, Document, OperationDefinition, Selection, SelectionSet};

/// Names of the fragments spread by the operation, directly or through other fragments.
pub(super) fn collect_used<'a>(
    document: &Document<'a, &'a str>,
    operation: &OperationDefinition<'a, &'a str>,
) -> HashSet<&'a str> {
    let fragments = document
        .definitions
        .iter()
        .filter_map(|definition| match definition {
            Definition::Fragment(fragment) => Some((fragment.name, &fragment.selection_set)),
            Definition::Operation(_) => None,
        })
        .collect::<HashMap<_, _>>();

    let mut used = HashSet::new();
    let mut queue = Vec::new();
    spreads(operation_selection_set(operation), &mut queue);

    while let Some(name) = queue.pop() {
        if !used.insert(name) {
            continue;
        }
        if let Some(selection_set) = fragments.get(name) {
            spreads(selection_set, &mut queue);
        }
    }

    used
}

fn operation_selection_set<'o, 'a>(operation: &'o OperationDefinition<'a, &'a str>) -> &'o SelectionSet<'a, &'a str> {
    match operation {
        OperationDefinition::SelectionSet(selection_set) => selection_set,
        OperationDefinition::Query(query) => &query.selection_set,
        OperationDefinition::Mutation(mutation) => &mutation.selection_set,
        OperationDefinition::Subscription(subscription) => &subscription.selection_set,
    }
}

fn spreads<'a>(selection_set: &SelectionSet<'a, &'a str>, out: &mut Vec<&'a str>) {
    for selection in &selection_set.items {
        match selection {
            Selection::Field(field) => spreads(&field.selection_set, out),
            Selection::FragmentSpread(spread) => out.push(spread.fragment_name),
            Selection::InlineFragment(fragment) => spreads(&fragment.selection_set, out),
        }
    }
}
