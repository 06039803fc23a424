//! Resource declarations: path segment, field schema and the operations a
//! resource supports, each with its own query-parameter whitelist.

use crate::query::EXPAND;

/// A kind of remote entity addressed by its own path segment.
pub trait Resource {
    /// Human readable name used in error messages.
    const NAME: &'static str;
    /// Path segment below the base URL, e.g. `actions`.
    const PATH: &'static str;
    /// Field names a record of this resource may hold. Unique.
    const FIELDS: &'static [&'static str];

    /// Path of a single instance: `{PATH}/{code}`.
    fn item_path(code: &str) -> String {
        format!("{}/{}", Self::PATH, code)
    }
}

/// Resources readable one at a time by code.
pub trait Single: Resource {
    const SINGLE_PARAMS: &'static [&'static str] = &[EXPAND];
}

/// Resources readable as a collection of `Item` records.
pub trait Collection: Resource {
    type Item: Resource;
    const COLLECTION_PARAMS: &'static [&'static str];
}

/// Resources that can be created.
pub trait Create: Resource {
    /// Keys every create payload must contain.
    const REQUIRED_FIELDS: &'static [&'static str];
    /// Keys a write payload may carry. Superset of `REQUIRED_FIELDS`.
    const WRITE_FIELDS: &'static [&'static str];
    const CREATE_PARAMS: &'static [&'static str] = &[EXPAND];
}

/// Resources that can be updated. No required-field check applies.
pub trait Update: Resource {
    const UPDATE_PARAMS: &'static [&'static str] = &[EXPAND];
}

/// Resources that can be deleted by code.
pub trait Delete: Resource {}

/// Schema consistency checks for resource declarations.
pub mod schema {
    use std::collections::HashSet;

    use super::{Create, Resource};

    /// Names that appear more than once in `names`.
    pub fn duplicates(names: &[&'static str]) -> Vec<&'static str> {
        let mut seen = HashSet::new();
        let mut dupes = Vec::new();
        for name in names {
            if !seen.insert(*name) && !dupes.contains(name) {
                dupes.push(*name);
            }
        }
        dupes
    }

    /// Problems with a resource's read schema.
    pub fn check<R: Resource>() -> Vec<String> {
        duplicates(R::FIELDS)
            .into_iter()
            .map(|name| format!("{}: field `{}` declared twice", R::NAME, name))
            .collect()
    }

    /// Problems with a writable resource's write schema.
    pub fn check_writable<R: Create>() -> Vec<String> {
        let mut problems = check::<R>();
        problems.extend(
            duplicates(R::WRITE_FIELDS)
                .into_iter()
                .map(|name| format!("{}: write field `{}` declared twice", R::NAME, name)),
        );
        problems.extend(
            R::REQUIRED_FIELDS
                .iter()
                .filter(|name| !R::WRITE_FIELDS.contains(name))
                .map(|name| format!("{}: required field `{}` is not writable", R::NAME, name)),
        );
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::schema;
    use super::{Create, Resource};

    struct Broken;

    impl Resource for Broken {
        const NAME: &'static str = "Broken";
        const PATH: &'static str = "broken";
        const FIELDS: &'static [&'static str] = &["id", "name", "id"];
    }

    impl Create for Broken {
        const REQUIRED_FIELDS: &'static [&'static str] = &["name", "owner"];
        const WRITE_FIELDS: &'static [&'static str] = &["name"];
    }

    #[test]
    fn item_path_appends_code() {
        assert_eq!(Broken::item_path("B1"), "broken/B1");
    }

    #[test]
    fn detects_duplicates_and_unwritable_required_fields() {
        let problems = schema::check_writable::<Broken>();
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("`id` declared twice"));
        assert!(problems[1].contains("`owner` is not writable"));
    }
}
