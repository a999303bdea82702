use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;


#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
	data: HashMap<String, Value>,
}


impl Table {
	pub fn new() -> Table {
		Table::default()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Table> {
		let path = path.as_ref();
		let data = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config '{}'", path.display()))?;

		Table::from_toml_str(&data)
			.with_context(|| format!("Failed to parse config '{}'", path.display()))
	}

	pub fn from_toml_str(data: &str) -> anyhow::Result<Table> {
		let raw: toml::Table = toml::from_str(data)?;
		Ok(Table::from_toml(raw))
	}

	/// Parses `--key=value` and `--flag` style arguments. Dotted keys address nested tables.
	pub fn from_cli(args: impl IntoIterator<Item = String>) -> anyhow::Result<Table> {
		let mut table = Table::new();

		for arg in args {
			let Some(arg) = arg.strip_prefix("--") else {
				log::debug!("Ignoring positional argument '{arg}'");
				continue
			};

			match arg.split_once('=') {
				Some((key, value)) => {
					anyhow::ensure!(!key.is_empty(), "Missing key in argument '--{arg}'");
					table.set_value(key, Value::parse(value));
				}

				None => table.set_value(arg, Value::Bool(true)),
			}
		}

		Ok(table)
	}

	pub fn save_to_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
		let path = path.as_ref();
		let string = toml::to_string_pretty(&self.to_toml())?;

		if let Some(parent_path) = path.parent() {
			std::fs::create_dir_all(parent_path)?;
		}

		std::fs::write(path, string)
			.with_context(|| format!("Failed to write config '{}'", path.display()))
	}

	/// Copy or replace values present in `other`
	pub fn merge_from(&mut self, other: &Table) {
		for (key, value) in other.data.iter() {
			match (self.data.get_mut(key), value) {
				(Some(Value::Table(ours)), Value::Table(theirs)) => ours.merge_from(theirs),
				_ => {
					self.data.insert(key.clone(), value.clone());
				}
			}
		}
	}

	/// Recursively remove values from this table that are present in `other`
	pub fn remove_values_in(&mut self, other: &Table) {
		for (key, value) in other.data.iter() {
			let Some(ours) = self.data.get_mut(key) else {
				continue
			};

			if let (Value::Table(ours), Value::Table(theirs)) = (&mut *ours, value) {
				ours.remove_values_in(theirs);
				if !ours.is_empty() {
					continue
				}
			}

			self.data.remove(key);
		}
	}

	pub fn get_value(&self, key: &str) -> Option<&Value> {
		if let Some((key, tail)) = key.split_once('.') {
			let subtable = self.data.get(key)?
				.as_table()?;

			subtable.get_value(tail)
		} else {
			self.data.get(key)
		}
	}

	pub fn set_value(&mut self, key: &str, value: Value) {
		if let Some((key, tail)) = key.split_once('.') {
			let entry = self.data.entry(key.into())
				.or_insert_with(|| Value::Table(Table::new()));

			// Scalars in the way of a nested key get replaced.
			if entry.as_table().is_none() {
				*entry = Value::Table(Table::new());
			}

			if let Some(subtable) = entry.as_table_mut() {
				subtable.set_value(tail, value);
			}

		} else {
			self.data.insert(key.into(), value);
		}
	}

	pub(crate) fn to_toml(&self) -> toml::Table {
		let mut tbl = toml::Table::new();

		for (key, value) in self.data.iter() {
			let value = match value {
				Value::String(string) => toml::Value::String(string.clone()),
				Value::Table(table) => toml::Value::Table(table.to_toml()),
				Value::Bool(b) => toml::Value::Boolean(*b),
				Value::Integer(i) => toml::Value::Integer(*i),
				Value::Float(f) => toml::Value::Float(*f),
			};

			tbl.insert(key.clone(), value);
		}

		tbl
	}

	fn from_toml(raw: toml::Table) -> Table {
		let mut table = Table::new();

		for (key, value) in raw {
			let value = match value {
				toml::Value::String(string) => Value::String(string),
				toml::Value::Table(tbl) => Value::Table(Table::from_toml(tbl)),
				toml::Value::Boolean(b) => Value::Bool(b),
				toml::Value::Integer(i) => Value::Integer(i),
				toml::Value::Float(f) => Value::Float(f),
				other => {
					log::warn!("Unsupported config value for '{key}': {other}");
					continue
				}
			};

			table.data.insert(key, value);
		}

		table
	}
}




#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	String(String),
	Table(Table),
	Bool(bool),
	Integer(i64),
	Float(f64),
}

impl Value {
	/// Interpret a command line value, falling back to a string.
	pub fn parse(text: &str) -> Value {
		if let Ok(b) = text.parse() {
			Value::Bool(b)
		} else if let Ok(i) = text.parse() {
			Value::Integer(i)
		} else if let Ok(f) = text.parse() {
			Value::Float(f)
		} else {
			Value::String(text.into())
		}
	}

	pub fn as_table(&self) -> Option<&Table> {
		match self {
			Value::Table(tbl) => Some(tbl),
			_ => None
		}
	}

	pub fn as_table_mut(&mut self) -> Option<&mut Table> {
		match self {
			Value::Table(tbl) => Some(tbl),
			_ => None
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(b) => Some(*b),
			_ => None
		}
	}

	pub fn as_float(&self) -> Option<f64> {
		match self {
			Value::Float(f) => Some(*f),
			Value::Integer(i) => Some(*i as f64),
			_ => None
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(s) => Some(s),
			_ => None
		}
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Value {
		Value::Bool(b)
	}
}

impl From<i64> for Value {
	fn from(i: i64) -> Value {
		Value::Integer(i)
	}
}

impl From<f64> for Value {
	fn from(f: f64) -> Value {
		Value::Float(f)
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Value {
		Value::String(s.into())
	}
}



#[cfg(test)]
mod test {
	use super::*;

	fn args(list: &[&str]) -> Vec<String> {
		list.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn nested_keys() {
		let mut table = Table::new();
		table.set_value("input.activity_threshold", 0.5.into());
		table.set_value("input.unknown_trigger", "checked".into());

		assert_eq!(table.get_value("input.activity_threshold"), Some(&Value::Float(0.5)));
		assert!(table.get_value("input").unwrap().as_table().is_some());
		assert!(table.get_value("input.missing").is_none());
		assert!(table.get_value("input.activity_threshold.deeper").is_none());
	}

	#[test]
	fn cli_values_are_typed() {
		let table = Table::from_cli(args(&["demo", "--fullscreen", "--input.max_queued_events=64", "--title=hello", "--scale=1.5"])).unwrap();

		assert_eq!(table.get_value("fullscreen"), Some(&Value::Bool(true)));
		assert_eq!(table.get_value("input.max_queued_events"), Some(&Value::Integer(64)));
		assert_eq!(table.get_value("title").and_then(Value::as_str), Some("hello"));
		assert_eq!(table.get_value("scale").and_then(Value::as_float), Some(1.5));
		assert!(table.get_value("demo").is_none());
	}

	#[test]
	fn cli_rejects_empty_key() {
		assert!(Table::from_cli(args(&["--=5"])).is_err());
	}

	#[test]
	fn merge_recurses_into_tables() {
		let mut base = Table::from_toml_str("[input]\nactivity_threshold = 0.1\nmax_queued_events = 8").unwrap();
		let overrides = Table::from_toml_str("[input]\nactivity_threshold = 0.5").unwrap();

		base.merge_from(&overrides);

		assert_eq!(base.get_value("input.activity_threshold"), Some(&Value::Float(0.5)));
		assert_eq!(base.get_value("input.max_queued_events"), Some(&Value::Integer(8)));
	}

	#[test]
	fn remove_values_prunes_empty_tables() {
		let mut table = Table::from_toml_str("title = 'x'\n[input]\nactivity_threshold = 0.1").unwrap();
		let other = Table::from_toml_str("[input]\nactivity_threshold = 0.5").unwrap();

		table.remove_values_in(&other);

		assert!(table.get_value("input").is_none());
		assert_eq!(table.get_value("title").and_then(Value::as_str), Some("x"));
	}
}
