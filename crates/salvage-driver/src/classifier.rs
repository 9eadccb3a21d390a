use salvage_types::{FieldView, Group};

/// Routes a recovered record to the group it belongs to.
///
/// Implementations must be pure: the same field view always maps to the
/// same group.
///
/// ```text
/// Record ──▶ Classifier::assign() ──▶ Some(Group) | None
/// ```
pub trait Classifier {
    fn assign<V: FieldView + ?Sized>(&self, record: &V) -> Option<Group>;
}

/// The field-shape rule chain used for application dumps.
///
/// Rules are tried in order and the first match wins:
///
/// ```text
/// ┌────┬──────────────────────────────────────────────────────┬───────────────────┐
/// │ #  │ Condition on the field-name set K                    │ Group             │
/// ├────┼──────────────────────────────────────────────────────┼───────────────────┤
/// │  1 │ metadata, or options + indexes with "indexes" in     │ Metadata          │
/// │    │ the text of metadata                                 │                   │
/// │  2 │ featureCompatibilityVersion                          │ Metadata          │
/// │  3 │ authSchema                                           │ Metadata          │
/// │  4 │ credentials, record text contains "SCRAM-SHA-1"      │ Metadata          │
/// │  5 │ email + (first_name | username)                      │ Users             │
/// │  6 │ name + owner_id, no domain_name                      │ Companies         │
/// │  7 │ domain_name, or template_config + logo               │ Landings          │
/// │  8 │ landing_id + (text | link)                           │ Links             │
/// │  9 │ exactly {_id, name} or {_id, name, type}             │ Roles             │
/// │ 10 │ subject + message                                    │ Newsletters       │
/// │ 11 │ subject + status                                     │ Newsletters       │
/// │ 12 │ newsletter_id + user_id                              │ NewsletterUsers   │
/// │ 13 │ title + (message | content)                          │ Notifications     │
/// │ 14 │ notification_id + user_id                            │ NotificationUsers │
/// │ 15 │ name + type, at most 5 fields                        │ Memberships       │
/// └────┴──────────────────────────────────────────────────────┴───────────────────┘
/// ```
///
/// The second clause of rule 1 reads the `metadata` field, so it can only
/// hold when the first clause already does.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShapeClassifier;

impl Classifier for ShapeClassifier {
    fn assign<V: FieldView + ?Sized>(&self, record: &V) -> Option<Group> {
        classify(record)
    }
}

/// Apply the [`ShapeClassifier`] rule chain.
///
/// # Example
///
/// ```rust
/// use salvage_driver::classify;
/// use salvage_types::{Group, Record};
///
/// let user = Record::new()
///     .with("_id", 1)
///     .with("email", "ana@example.com")
///     .with("first_name", "Ana");
/// assert_eq!(classify(&user), Some(Group::Users));
/// ```
pub fn classify<V: FieldView + ?Sized>(record: &V) -> Option<Group> {
    let has = |name: &str| record.has_field(name);

    if has("metadata")
        || (has("options")
            && has("indexes")
            && record
                .field_text("metadata")
                .unwrap_or_default()
                .contains("indexes"))
    {
        return Some(Group::Metadata);
    }
    if has("featureCompatibilityVersion") || has("authSchema") {
        return Some(Group::Metadata);
    }
    if has("credentials") && record.text().contains("SCRAM-SHA-1") {
        return Some(Group::Metadata);
    }

    if has("email") && (has("first_name") || has("username")) {
        return Some(Group::Users);
    }
    if has("name") && has("owner_id") && !has("domain_name") {
        return Some(Group::Companies);
    }
    if has("domain_name") || (has("template_config") && has("logo")) {
        return Some(Group::Landings);
    }
    if has("landing_id") && (has("text") || has("link")) {
        return Some(Group::Links);
    }
    if record.has_exactly(&["_id", "name"]) || record.has_exactly(&["_id", "name", "type"]) {
        return Some(Group::Roles);
    }
    if has("subject") && (has("message") || has("status")) {
        return Some(Group::Newsletters);
    }
    if has("newsletter_id") && has("user_id") {
        return Some(Group::NewsletterUsers);
    }
    if has("title") && (has("message") || has("content")) {
        return Some(Group::Notifications);
    }
    if has("notification_id") && has("user_id") {
        return Some(Group::NotificationUsers);
    }
    if has("name") && has("type") && record.field_count() <= 5 {
        return Some(Group::Memberships);
    }
    None
}

#[cfg(test)]
mod tests {
    use salvage_types::{Record, Value};

    use super::*;

    /// Record with the given keys, all bound to null.
    fn shape(keys: &[&str]) -> Record {
        keys.iter().map(|k| (*k, Value::Null)).collect()
    }

    #[test]
    fn scenario_shapes() {
        assert_eq!(classify(&shape(&["_id", "email", "first_name"])), Some(Group::Users));
        assert_eq!(classify(&shape(&["_id", "name", "owner_id"])), Some(Group::Companies));
        assert_eq!(classify(&shape(&["_id", "name"])), Some(Group::Roles));
        assert_eq!(classify(&shape(&["_id", "subject", "status"])), Some(Group::Newsletters));
        assert_eq!(
            classify(&shape(&["_id", "featureCompatibilityVersion"])),
            Some(Group::Metadata)
        );
    }

    #[test]
    fn one_shape_per_rule() {
        let cases: &[(&[&str], Option<Group>)] = &[
            (&["metadata"], Some(Group::Metadata)),
            (&["_id", "authSchema"], Some(Group::Metadata)),
            (&["_id", "email", "username"], Some(Group::Users)),
            (&["_id", "domain_name"], Some(Group::Landings)),
            (&["_id", "template_config", "logo"], Some(Group::Landings)),
            (&["_id", "landing_id", "text"], Some(Group::Links)),
            (&["_id", "landing_id", "link"], Some(Group::Links)),
            (&["_id", "name", "type"], Some(Group::Roles)),
            (&["_id", "subject", "message"], Some(Group::Newsletters)),
            (&["_id", "newsletter_id", "user_id"], Some(Group::NewsletterUsers)),
            (&["_id", "title", "message"], Some(Group::Notifications)),
            (&["_id", "title", "content"], Some(Group::Notifications)),
            (&["_id", "notification_id", "user_id"], Some(Group::NotificationUsers)),
            (&["_id", "name", "type", "price"], Some(Group::Memberships)),
            (&["_id", "name", "type", "a", "b"], Some(Group::Memberships)),
            (&["_id", "name", "type", "a", "b", "c"], None),
            (&["_id", "landing_id"], None),
            (&["_id", "email"], None),
            (&[], None),
        ];
        for (keys, expected) in cases {
            assert_eq!(classify(&shape(keys)), *expected, "keys {keys:?}");
        }
    }

    #[test]
    fn earlier_rules_take_precedence() {
        // Users before Companies.
        assert_eq!(
            classify(&shape(&["email", "username", "name", "owner_id"])),
            Some(Group::Users)
        );
        // domain_name blocks Companies, so Landings takes it.
        assert_eq!(
            classify(&shape(&["name", "owner_id", "domain_name"])),
            Some(Group::Landings)
        );
        // Newsletters (subject + message) before Notifications (title + message).
        assert_eq!(
            classify(&shape(&["subject", "title", "message"])),
            Some(Group::Newsletters)
        );
        // Metadata before everything.
        assert_eq!(
            classify(&shape(&["metadata", "email", "username"])),
            Some(Group::Metadata)
        );
    }

    #[test]
    fn overlapping_rules_resolve_to_the_earlier_one() {
        let cases: &[(&[&str], Group)] = &[
            // Links before Memberships, even at five fields.
            (&["_id", "landing_id", "text", "name", "type"], Group::Links),
            // NewsletterUsers before NotificationUsers.
            (&["_id", "newsletter_id", "notification_id", "user_id"], Group::NewsletterUsers),
            // Notifications before Memberships.
            (&["_id", "title", "message", "name", "type"], Group::Notifications),
            // Landings before Links.
            (&["_id", "domain_name", "landing_id", "text"], Group::Landings),
            // Companies before Memberships.
            (&["name", "owner_id", "type"], Group::Companies),
            // Roles before Memberships.
            (&["_id", "name", "type"], Group::Roles),
        ];
        for (keys, expected) in cases {
            assert_eq!(classify(&shape(keys)), Some(*expected), "keys {keys:?}");
        }
    }

    #[test]
    fn roles_require_exact_key_set() {
        assert_eq!(classify(&shape(&["name", "_id"])), Some(Group::Roles));
        // Extra field: not a role, falls through to memberships only with type.
        assert_eq!(classify(&shape(&["_id", "name", "slug"])), None);
        assert_eq!(classify(&shape(&["name"])), None);
    }

    #[test]
    fn credentials_need_scram_text() {
        let with_scram = Record::new().with("_id", "admin.root").with(
            "credentials",
            Record::new().with("SCRAM-SHA-1", Record::new().with("iterationCount", 10_000)),
        );
        assert_eq!(classify(&with_scram), Some(Group::Metadata));

        // The marker can be anywhere in the record text, including values.
        let in_value = Record::new()
            .with("credentials", Value::Null)
            .with("mechanism", "SCRAM-SHA-1");
        assert_eq!(classify(&in_value), Some(Group::Metadata));

        let without = Record::new()
            .with("credentials", Record::new())
            .with("email", "x@y.z")
            .with("username", "x");
        assert_eq!(classify(&without), Some(Group::Users));
    }

    #[test]
    fn options_and_indexes_without_metadata_fall_through() {
        let record = Record::new()
            .with("options", Record::new())
            .with("indexes", vec![Value::from("indexes")]);
        assert_eq!(classify(&record), None);
    }

    #[test]
    fn trait_and_free_function_agree() {
        let record = shape(&["_id", "newsletter_id", "user_id"]);
        assert_eq!(ShapeClassifier.assign(&record), classify(&record));
    }

    /// A view that knows only field names, to show the rules do not depend
    /// on the record representation.
    struct Keys(Vec<String>);

    impl Keys {
        fn of(names: &[&str]) -> Self {
            Keys(names.iter().map(|n| (*n).to_string()).collect())
        }
    }

    impl FieldView for Keys {
        fn has_field(&self, name: &str) -> bool {
            self.0.iter().any(|k| k == name)
        }

        fn field_count(&self) -> usize {
            self.0.len()
        }

        fn field_names(&self) -> impl Iterator<Item = &str> {
            self.0.iter().map(String::as_str)
        }

        fn field_text(&self, name: &str) -> Option<String> {
            self.has_field(name).then(String::new)
        }

        fn text(&self) -> String {
            self.0.join(",")
        }
    }

    #[test]
    fn works_over_any_field_view() {
        assert_eq!(classify(&Keys::of(&["_id", "name", "type"])), Some(Group::Roles));
        assert_eq!(classify(&Keys::of(&["credentials", "SCRAM-SHA-1"])), Some(Group::Metadata));
    }
}
