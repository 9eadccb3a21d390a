use std::fmt;
use std::str::FromStr;

/// Output partition a recovered record is routed to.
///
/// "No group" is expressed as `Option<Group>::None` by the classifier.
/// [`Group::Metadata`] is a real routing outcome (server bookkeeping such
/// as index specs, feature-compat flags and auth documents) but it is never
/// persisted.
///
/// ```text
/// ┌───────────────────┬─────────────────────┬───────────┐
/// │ Variant           │ Output name         │ Persisted │
/// ├───────────────────┼─────────────────────┼───────────┤
/// │ Metadata          │ metadata            │ no        │
/// │ Users             │ users               │ yes       │
/// │ Companies         │ companies           │ yes       │
/// │ Landings          │ landings            │ yes       │
/// │ Links             │ links               │ yes       │
/// │ Roles             │ roles               │ yes       │
/// │ Newsletters       │ newsletters         │ yes       │
/// │ NewsletterUsers   │ newsletter_users    │ yes       │
/// │ Notifications     │ notifications       │ yes       │
/// │ NotificationUsers │ notification_users  │ yes       │
/// │ Memberships       │ memberships         │ yes       │
/// └───────────────────┴─────────────────────┴───────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Group {
  Metadata,
  Users,
  Companies,
  Landings,
  Links,
  Roles,
  Newsletters,
  NewsletterUsers,
  Notifications,
  NotificationUsers,
  Memberships,
}

impl Group {
  pub const ALL: [Group; 11] = [
    Group::Metadata,
    Group::Users,
    Group::Companies,
    Group::Landings,
    Group::Links,
    Group::Roles,
    Group::Newsletters,
    Group::NewsletterUsers,
    Group::Notifications,
    Group::NotificationUsers,
    Group::Memberships,
  ];

  /// Stable name used for output files and the summary report.
  #[must_use]
  pub fn name(self) -> &'static str {
    match self {
      Group::Metadata => "metadata",
      Group::Users => "users",
      Group::Companies => "companies",
      Group::Landings => "landings",
      Group::Links => "links",
      Group::Roles => "roles",
      Group::Newsletters => "newsletters",
      Group::NewsletterUsers => "newsletter_users",
      Group::Notifications => "notifications",
      Group::NotificationUsers => "notification_users",
      Group::Memberships => "memberships",
    }
  }

  /// Whether records in this group reach the output.
  #[must_use]
  pub fn is_persisted(self) -> bool {
    self != Group::Metadata
  }
}

impl fmt::Display for Group {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Returned when parsing an unrecognised group name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown group name: {0:?}")]
pub struct UnknownGroup(pub String);

impl FromStr for Group {
  type Err = UnknownGroup;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Group::ALL
      .into_iter()
      .find(|g| g.name() == s)
      .ok_or_else(|| UnknownGroup(s.to_string()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn names_roundtrip_through_from_str() {
    for group in Group::ALL {
      assert_eq!(group.name().parse::<Group>().unwrap(), group);
    }
  }

  #[test]
  fn only_metadata_is_dropped() {
    let dropped: Vec<_> = Group::ALL.into_iter().filter(|g| !g.is_persisted()).collect();
    assert_eq!(dropped, [Group::Metadata]);
  }

  #[test]
  fn unknown_name_errors() {
    assert_eq!("orders".parse::<Group>(), Err(UnknownGroup("orders".into())));
  }
}
