use super::{Entry, ListBehavior, ListDocument, ListError};

/// Remove `item` from a list, the mirror image of [`super::add::apply`].
pub fn apply(
    list_name: &str,
    behavior: ListBehavior,
    doc: &mut ListDocument,
    item: &str,
    options: Option<&str>,
) -> Result<String, ListError> {
    match options.filter(|opts| !opts.trim().is_empty()) {
        Some(opts) if behavior.multiple_options => remove_from_tags(list_name, doc, item, opts),
        Some(opts) => remove_value(list_name, behavior, doc, item, opts),
        None if behavior.require_options && !behavior.multiple_options => {
            remove_key(list_name, behavior, doc, item)
        }
        None => remove_plain(list_name, doc, item),
    }
}

fn remove_plain(list_name: &str, doc: &mut ListDocument, item: &str) -> Result<String, ListError> {
    let items = doc.as_array_mut().ok_or_else(|| ListError::WrongShape {
        list: list_name.to_string(),
    })?;

    let position =
        items
            .iter()
            .position(|existing| existing == item)
            .ok_or_else(|| ListError::Missing {
                item: item.to_string(),
                list: list_name.to_string(),
            })?;

    items.remove(position);
    Ok(format!("`{item}` was removed from \"{list_name}\""))
}

/// Remove one value from under a key. A key emptied of its last value is
/// dropped entirely so it can later be recreated with either shape.
fn remove_value(
    list_name: &str,
    behavior: ListBehavior,
    doc: &mut ListDocument,
    item: &str,
    value: &str,
) -> Result<String, ListError> {
    let key = normalize_key(behavior, item);
    let entries = doc.as_mapping_mut().ok_or_else(|| ListError::WrongShape {
        list: list_name.to_string(),
    })?;

    match entries.get_mut(&key) {
        Some(Entry::Many(values)) => {
            let position = values
                .iter()
                .position(|existing| existing == value)
                .ok_or_else(|| ListError::ValueMissing {
                    value: value.to_string(),
                    key: key.clone(),
                })?;
            values.remove(position);
            if values.is_empty() {
                entries.remove(&key);
            }
        }
        Some(Entry::Scalar(existing)) => {
            if existing != value {
                return Err(ListError::ValueMissing {
                    value: value.to_string(),
                    key,
                });
            }
            entries.remove(&key);
        }
        None => {
            return Err(ListError::UnknownKey {
                key,
                list: list_name.to_string(),
            });
        }
    }

    Ok(format!("`{value}` was removed from `{key}`"))
}

/// Remove a whole key, whichever shape it holds.
fn remove_key(
    list_name: &str,
    behavior: ListBehavior,
    doc: &mut ListDocument,
    item: &str,
) -> Result<String, ListError> {
    let key = normalize_key(behavior, item);
    let entries = doc.as_mapping_mut().ok_or_else(|| ListError::WrongShape {
        list: list_name.to_string(),
    })?;

    if entries.remove(&key).is_none() {
        return Err(ListError::UnknownKey {
            key,
            list: list_name.to_string(),
        });
    }

    Ok(format!("`{key}` was removed from \"{list_name}\""))
}

fn remove_from_tags(
    list_name: &str,
    doc: &mut ListDocument,
    item: &str,
    options: &str,
) -> Result<String, ListError> {
    let entries = doc.as_mapping_mut().ok_or_else(|| ListError::WrongShape {
        list: list_name.to_string(),
    })?;

    let tags: Vec<String> = options.split_whitespace().map(str::to_lowercase).collect();
    let mut missing: Vec<String> = Vec::new();

    for tag in &tags {
        match entries.get_mut(tag) {
            Some(Entry::Many(values)) => {
                if let Some(position) = values.iter().position(|existing| existing == item) {
                    values.remove(position);
                    if values.is_empty() {
                        entries.remove(tag);
                    }
                } else {
                    missing.push(tag.clone());
                }
            }
            _ => missing.push(tag.clone()),
        }
    }

    if missing.len() == tags.len() {
        return Err(ListError::AllTagsMissing {
            item: item.to_string(),
            tags: missing.join(", "),
        });
    }

    if !missing.is_empty() {
        return Ok(format!(
            "`{item}` is not in `{}` but it was removed from any tags not listed.",
            missing.join(", ")
        ));
    }

    Ok(format!(
        "`{item}` was removed from tags `{}`",
        tags.join(", ")
    ))
}

fn normalize_key(behavior: ListBehavior, item: &str) -> String {
    if behavior.url_only {
        item.to_string()
    } else {
        item.to_lowercase()
    }
}
