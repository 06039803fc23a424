//! Typed records built from XML responses.
//!
//! A [`Record`] holds values only for the fields its [`Resource`] declares.
//! Reading or writing any other name fails with [`Error::UnknownField`].

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use chrono::{NaiveDate, NaiveDateTime};

use crate::{resource::Resource, xml::XmlNode, Error};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Value of a single record field.
///
/// Scalars (strings, numbers, dates) are kept as text exactly as the server
/// sent them. Elements with children or attributes are kept as a subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Node(XmlNode),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Node(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_str().and_then(|s| s.trim().parse().ok())
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_str().and_then(|s| s.trim().parse().ok())
    }

    /// Parses a `YYYY-MM-DD` date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        self.as_str()
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok())
    }

    /// Parses a `YYYY-MM-DD HH:MM:SS` or RFC 3339 timestamp.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        let s = self.as_str()?.trim();
        NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
            .ok()
            .or_else(|| {
                chrono::DateTime::parse_from_rfc3339(s)
                    .ok()
                    .map(|dt| dt.naive_utc())
            })
    }

    pub fn as_node(&self) -> Option<&XmlNode> {
        match self {
            FieldValue::Node(node) => Some(node),
            FieldValue::Text(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Text(value.format(DATE_FORMAT).to_string())
    }
}

impl From<XmlNode> for FieldValue {
    fn from(value: XmlNode) -> Self {
        FieldValue::Node(value)
    }
}

/// One instance of resource `R`.
pub struct Record<R: Resource> {
    values: BTreeMap<&'static str, FieldValue>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Record<R> {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
            _resource: PhantomData,
        }
    }

    /// Builds a record from a response element.
    pub fn from_xml(node: &XmlNode) -> Self {
        let mut record = Self::new();
        record.absorb_xml(node);
        record
    }

    /// Copies every declared field found in `node` into this record.
    ///
    /// A field is read from the child element of the same name, or failing
    /// that from an attribute. Declared fields missing from `node` keep their
    /// current value. Undeclared elements are dropped.
    pub fn absorb_xml(&mut self, node: &XmlNode) -> &mut Self {
        for field in R::FIELDS {
            if let Some(child) = node.child(field) {
                let value = if child.is_leaf() {
                    FieldValue::Text(child.text().to_string())
                } else {
                    FieldValue::Node(child.clone())
                };
                self.values.insert(*field, value);
            } else if let Some(attr) = node.attribute(field) {
                self.values.insert(*field, FieldValue::Text(attr.to_string()));
            }
        }
        for child in node.children() {
            if !R::FIELDS.contains(&child.name()) {
                tracing::debug!("Dropping undeclared {} field `{}`", R::NAME, child.name());
            }
        }
        self
    }

    /// Value of a declared field, `None` when it was never set.
    pub fn get(&self, field: &str) -> Result<Option<&FieldValue>, Error> {
        let field = Self::declared(field)?;
        Ok(self.values.get(field))
    }

    /// Text value of a declared field.
    pub fn get_str(&self, field: &str) -> Result<Option<&str>, Error> {
        Ok(self.get(field)?.and_then(FieldValue::as_str))
    }

    pub fn set(&mut self, field: &str, value: impl Into<FieldValue>) -> Result<&mut Self, Error> {
        let field = Self::declared(field)?;
        self.values.insert(field, value.into());
        Ok(self)
    }

    /// Sets several fields at once. Nothing is assigned if any name is undeclared.
    pub fn set_data<I, K, V>(&mut self, data: I) -> Result<&mut Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FieldValue>,
    {
        let mut staged = Vec::new();
        for (key, value) in data {
            staged.push((Self::declared(key.as_ref())?, value.into()));
        }
        self.values.extend(staged);
        Ok(self)
    }

    /// Parses a nested element field as a record of another resource.
    ///
    /// An unset or empty field gives `None`. A field holding plain text cannot
    /// be a record and fails with [`Error::MalformedResponse`].
    pub fn nested<S: Resource>(&self, field: &str) -> Result<Option<Record<S>>, Error> {
        match self.get(field)? {
            None => Ok(None),
            Some(FieldValue::Node(node)) => Ok(Some(Record::from_xml(node))),
            Some(FieldValue::Text(text)) if text.trim().is_empty() => Ok(None),
            Some(FieldValue::Text(text)) => Err(Error::MalformedResponse(format!(
                "{} field `{}` holds text `{}`, expected a nested {}",
                R::NAME,
                field,
                text,
                S::NAME
            ))),
        }
    }

    pub fn is_set(&self, field: &str) -> Result<bool, Error> {
        Ok(self.get(field)?.is_some())
    }

    /// Number of fields that hold a value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Set fields in schema order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> + '_ {
        R::FIELDS
            .iter()
            .filter_map(|field| self.values.get(field).map(|value| (*field, value)))
    }

    /// Renders the set fields as children of a new `root` element.
    pub fn to_xml(&self, root: &str) -> XmlNode {
        let mut node = XmlNode::new(root);
        for (field, value) in self.fields() {
            let child = match value {
                FieldValue::Text(text) => XmlNode::new(field).with_text(text),
                FieldValue::Node(inner) => {
                    let mut renamed = XmlNode::new(field).with_text(inner.text());
                    for (k, v) in inner.attributes() {
                        renamed = renamed.with_attribute(k, v);
                    }
                    for c in inner.children() {
                        renamed.push_child(c.clone());
                    }
                    renamed
                }
            };
            node.push_child(child);
        }
        node
    }

    fn declared(field: &str) -> Result<&'static str, Error> {
        R::FIELDS
            .iter()
            .find(|declared| **declared == field)
            .copied()
            .ok_or_else(|| Error::UnknownField {
                resource: R::NAME,
                field: field.to_string(),
            })
    }
}

impl<R: Resource> Default for Record<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> Clone for Record<R> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> PartialEq for Record<R> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<R: Resource> fmt::Debug for Record<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(R::NAME).field("values", &self.values).finish()
    }
}

/// Ordered records parsed from the children of a collection response.
pub struct RecordSet<R: Resource> {
    items: Vec<Record<R>>,
}

impl<R: Resource> RecordSet<R> {
    /// One record per child element, in document order.
    pub fn from_xml(node: &XmlNode) -> Self {
        Self {
            items: node.children().iter().map(Record::from_xml).collect(),
        }
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Record<R>] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record<R>> {
        self.items.iter()
    }

    pub fn into_items(self) -> Vec<Record<R>> {
        self.items
    }
}

impl<R: Resource> IntoIterator for RecordSet<R> {
    type Item = Record<R>;
    type IntoIter = std::vec::IntoIter<Record<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<R: Resource> fmt::Debug for RecordSet<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}
