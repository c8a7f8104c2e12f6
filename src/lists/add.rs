use super::{Entry, ListBehavior, ListDocument, ListError, is_url};

/// Add `item` to a list, dispatching on the command's behaviour switches the
/// same way the options argument was supplied. Mutates the document in place
/// and returns the user-facing success message.
pub fn apply(
    list_name: &str,
    behavior: ListBehavior,
    doc: &mut ListDocument,
    item: &str,
    options: Option<&str>,
) -> Result<String, ListError> {
    match options.filter(|opts| !opts.trim().is_empty()) {
        Some(opts) if behavior.multiple_options => {
            add_with_tags(list_name, behavior, doc, item, opts)
        }
        Some(opts) => add_with_value(list_name, behavior, doc, item, opts),
        None => add_plain(list_name, behavior, doc, item),
    }
}

/// Array-shaped lists: append with a case-sensitive duplicate check.
fn add_plain(
    list_name: &str,
    behavior: ListBehavior,
    doc: &mut ListDocument,
    item: &str,
) -> Result<String, ListError> {
    require_url_if_configured(behavior, item)?;

    let items = doc.as_array_mut().ok_or_else(|| ListError::WrongShape {
        list: list_name.to_string(),
    })?;

    if items.iter().any(|existing| existing == item) {
        return Err(ListError::Duplicate {
            item: item.to_string(),
            list: list_name.to_string(),
        });
    }

    items.push(item.to_string());
    Ok(format!("`{item}` was added to \"{list_name}\""))
}

/// Mapping-shaped lists, one value per key. A key that already holds many
/// values accumulates; a key that holds a single value never gets overwritten.
fn add_with_value(
    list_name: &str,
    behavior: ListBehavior,
    doc: &mut ListDocument,
    item: &str,
    value: &str,
) -> Result<String, ListError> {
    if !behavior.url_only && is_url(item) {
        return Err(ListError::UnexpectedUrl);
    }

    let key = if behavior.url_only {
        item.to_string()
    } else {
        item.to_lowercase()
    };

    let entries = doc.as_mapping_mut().ok_or_else(|| ListError::WrongShape {
        list: list_name.to_string(),
    })?;

    match entries.get_mut(&key) {
        Some(Entry::Many(values)) => {
            if values.iter().any(|existing| existing == value) {
                return Err(ListError::ValueDuplicate {
                    value: value.to_string(),
                    key,
                });
            }
            values.push(value.to_string());
        }
        Some(Entry::Scalar(_)) => return Err(ListError::KeyExists { key }),
        None => {
            entries.insert(key.clone(), Entry::Scalar(value.to_string()));
        }
    }

    Ok(format!("`{value}` was added to `{key}`"))
}

/// Tag-map lists: file `item` under every given tag, in caller order. Tags
/// where the item already exists are collected; the call only fails outright
/// when every tag rejected it.
fn add_with_tags(
    list_name: &str,
    behavior: ListBehavior,
    doc: &mut ListDocument,
    item: &str,
    options: &str,
) -> Result<String, ListError> {
    require_url_if_configured(behavior, item)?;

    let entries = doc.as_mapping_mut().ok_or_else(|| ListError::WrongShape {
        list: list_name.to_string(),
    })?;

    let tags: Vec<String> = options.split_whitespace().map(str::to_lowercase).collect();
    let mut duplicates: Vec<String> = Vec::new();

    for tag in &tags {
        match entries.get_mut(tag) {
            Some(Entry::Many(values)) => {
                if values.iter().any(|existing| existing == item) {
                    duplicates.push(tag.clone());
                } else {
                    values.push(item.to_string());
                }
            }
            Some(Entry::Scalar(_)) => {
                return Err(ListError::KeyExists { key: tag.clone() });
            }
            None => {
                entries.insert(tag.clone(), Entry::Many(vec![item.to_string()]));
            }
        }
    }

    if duplicates.len() == tags.len() {
        return Err(ListError::AllTagsDuplicate {
            item: item.to_string(),
            tags: duplicates.join(", "),
        });
    }

    if !duplicates.is_empty() {
        return Ok(format!(
            "`{item}` is already in `{}` but any tags not listed were added successfully.",
            duplicates.join(", ")
        ));
    }

    Ok(format!("`{item}` was added with tags `{}`", tags.join(", ")))
}

fn require_url_if_configured(behavior: ListBehavior, item: &str) -> Result<(), ListError> {
    if behavior.url_only && !is_url(item) {
        return Err(ListError::NotUrl {
            item: item.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lists::{ListShape, TagMap};

    const PLAIN: ListBehavior = ListBehavior {
        require_options: false,
        multiple_options: false,
        url_only: false,
    };
    const KEYED: ListBehavior = ListBehavior {
        require_options: true,
        multiple_options: false,
        url_only: false,
    };
    const TAGGED_URLS: ListBehavior = ListBehavior {
        require_options: true,
        multiple_options: true,
        url_only: true,
    };

    #[test]
    fn test_add_to_empty_array_list() {
        let mut doc = ListShape::Array.empty();
        let reply = apply("thing", PLAIN, &mut doc, "hello", None).unwrap();

        assert_eq!(reply, "`hello` was added to \"thing\"");
        assert_eq!(doc, ListDocument::Array(vec!["hello".to_string()]));
    }

    #[test]
    fn test_add_duplicate_to_array_list_fails() {
        let mut doc = ListDocument::Array(vec!["hello".to_string()]);
        let err = apply("thing", PLAIN, &mut doc, "hello", None).unwrap_err();

        assert_eq!(err.to_string(), "`hello` is already in \"thing\"");
        assert_eq!(doc, ListDocument::Array(vec!["hello".to_string()]));
    }

    #[test]
    fn test_array_duplicate_check_is_case_sensitive() {
        let mut doc = ListDocument::Array(vec!["Hello".to_string()]);
        apply("thing", PLAIN, &mut doc, "hello", None).unwrap();

        assert_eq!(
            doc,
            ListDocument::Array(vec!["Hello".to_string(), "hello".to_string()])
        );
    }

    #[test]
    fn test_single_value_add_inserts_scalar_under_lowercased_key() {
        let mut doc = ListShape::Mapping.empty();
        let reply = apply("shortcut", KEYED, &mut doc, "OMW", Some("On my way!")).unwrap();

        assert_eq!(reply, "`On my way!` was added to `omw`");
        assert_eq!(doc.entry("omw"), Some(&Entry::Scalar("On my way!".to_string())));
    }

    #[test]
    fn test_single_value_add_rejects_existing_key_regardless_of_value() {
        let mut doc = ListShape::Mapping.empty();
        apply("shortcut", KEYED, &mut doc, "u", Some("you")).unwrap();
        let err = apply("shortcut", KEYED, &mut doc, "u", Some("something else")).unwrap_err();

        assert_eq!(err, ListError::KeyExists { key: "u".to_string() });
        assert_eq!(doc.entry("u"), Some(&Entry::Scalar("you".to_string())));
    }

    #[test]
    fn test_single_value_add_rejects_url_items() {
        let mut doc = ListShape::Mapping.empty();
        let err = apply("shortcut", KEYED, &mut doc, "http://example.com/x", Some("oops"))
            .unwrap_err();

        assert_eq!(err, ListError::UnexpectedUrl);
    }

    #[test]
    fn test_single_value_add_appends_to_existing_many_entry() {
        let mut entries = TagMap::new();
        entries.insert("memes".to_string(), Entry::Many(vec!["a".to_string()]));
        let mut doc = ListDocument::Mapping(entries);

        apply("shortcut", KEYED, &mut doc, "memes", Some("b")).unwrap();
        assert_eq!(
            doc.entry("memes"),
            Some(&Entry::Many(vec!["a".to_string(), "b".to_string()]))
        );

        let err = apply("shortcut", KEYED, &mut doc, "memes", Some("b")).unwrap_err();
        assert_eq!(
            err,
            ListError::ValueDuplicate {
                value: "b".to_string(),
                key: "memes".to_string(),
            }
        );
    }

    #[test]
    fn test_tagged_add_creates_each_tag() {
        let url = "http://i.imgur.com/f75Pzvn.jpg";
        let mut doc = ListShape::Mapping.empty();

        let reply = apply("tag", TAGGED_URLS, &mut doc, url, Some("kyuu lhu")).unwrap();
        assert_eq!(reply, format!("`{url}` was added with tags `kyuu, lhu`"));
        assert_eq!(doc.entry("kyuu"), Some(&Entry::Many(vec![url.to_string()])));
        assert_eq!(doc.entry("lhu"), Some(&Entry::Many(vec![url.to_string()])));
    }

    #[test]
    fn test_tagged_add_fails_when_every_tag_already_has_item() {
        let url = "http://i.imgur.com/f75Pzvn.jpg";
        let mut doc = ListShape::Mapping.empty();
        apply("tag", TAGGED_URLS, &mut doc, url, Some("kyuu lhu")).unwrap();

        let err = apply("tag", TAGGED_URLS, &mut doc, url, Some("kyuu lhu")).unwrap_err();
        assert_eq!(err.to_string(), format!("`{url}` is already in `kyuu, lhu`"));
    }

    #[test]
    fn test_tagged_add_reports_exactly_the_rejected_subset() {
        let url = "http://i.imgur.com/f75Pzvn.jpg";
        let mut doc = ListShape::Mapping.empty();
        apply("tag", TAGGED_URLS, &mut doc, url, Some("kyuu")).unwrap();

        let reply = apply("tag", TAGGED_URLS, &mut doc, url, Some("kyuu lhu email")).unwrap();
        assert_eq!(
            reply,
            format!("`{url}` is already in `kyuu` but any tags not listed were added successfully.")
        );
        assert_eq!(doc.entry("lhu"), Some(&Entry::Many(vec![url.to_string()])));
        assert_eq!(doc.entry("email"), Some(&Entry::Many(vec![url.to_string()])));
        assert_eq!(doc.entry("kyuu"), Some(&Entry::Many(vec![url.to_string()])));
    }

    #[test]
    fn test_tagged_add_lowercases_tags_and_keeps_caller_order() {
        let url = "http://i.imgur.com/f75Pzvn.jpg";
        let mut doc = ListShape::Mapping.empty();

        let reply = apply("tag", TAGGED_URLS, &mut doc, url, Some("Zeta Alpha")).unwrap();
        assert_eq!(reply, format!("`{url}` was added with tags `zeta, alpha`"));
        assert!(doc.entry("zeta").is_some());
        assert!(doc.entry("alpha").is_some());
    }

    #[test]
    fn test_tagged_add_requires_url_items() {
        let mut doc = ListShape::Mapping.empty();
        let err = apply("tag", TAGGED_URLS, &mut doc, "not a url", Some("kyuu")).unwrap_err();

        assert_eq!(
            err,
            ListError::NotUrl {
                item: "not a url".to_string(),
            }
        );
    }

    #[test]
    fn test_tagged_add_rejects_scalar_shaped_key() {
        let mut entries = TagMap::new();
        entries.insert("kyuu".to_string(), Entry::Scalar("someone".to_string()));
        let mut doc = ListDocument::Mapping(entries);

        let err = apply(
            "tag",
            TAGGED_URLS,
            &mut doc,
            "http://i.imgur.com/f75Pzvn.jpg",
            Some("kyuu"),
        )
        .unwrap_err();
        assert_eq!(err, ListError::KeyExists { key: "kyuu".to_string() });
    }

    #[test]
    fn test_plain_add_on_mapping_document_reports_wrong_shape() {
        let mut doc = ListShape::Mapping.empty();
        let err = apply("thing", PLAIN, &mut doc, "hello", None).unwrap_err();

        assert_eq!(
            err,
            ListError::WrongShape {
                list: "thing".to_string(),
            }
        );
    }
}
