pub mod prelude {}

pub mod table;
pub use table::{Table, Value};

use anyhow::Context;
use std::path::{Path, PathBuf};


/// Runtime representation of hierarchical key-value storage, intended for settings, command line config, etc.
#[derive(Debug, Clone, Default)]
pub struct Config {
	/// Config loaded and saved to disk.
	base: Table,

	/// Any config overrided by CLI args.
	arguments: Table,

	/// Config set during runtime that can be either committed to base or reverted.
	preview: Table,

	save_path: PathBuf,
}

impl Config {
	pub fn for_app_name(app_name: &str) -> anyhow::Result<Self> {
		let path = config_path(app_name)?;
		Config::from_path(path, std::env::args().skip(1))
	}

	/// Load `path` if it exists, otherwise create it empty, and layer `args` on top.
	pub fn from_path(path: impl Into<PathBuf>, args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
		let mut config = Self::default();

		config.save_path = path.into();
		if config.save_path.exists() {
			config.base = Table::from_file(&config.save_path)?;
		} else {
			config.base.save_to_file(&config.save_path)?;
		}

		config.arguments = Table::from_cli(args)?;

		log::info!("Loaded config: {config:?}");

		Ok(config)
	}

	pub fn save_path(&self) -> &Path {
		&self.save_path
	}

	pub fn save(&self) -> anyhow::Result<()> {
		self.base.save_to_file(&self.save_path)
	}

	/// Make previewed values permanent. They will be written by the next [`Config::save`].
	pub fn commit(&mut self) {
		self.base.merge_from(&self.preview);
		self.arguments.remove_values_in(&self.preview);

		self.preview = Table::new();
	}

	pub fn revert(&mut self) {
		self.preview = Table::new();
	}
}

impl Config {
	pub fn get_value(&self, key: &str) -> Option<&Value> {
		if let Some(value) = self.preview.get_value(key) {
			return Some(value)
		}

		if let Some(value) = self.arguments.get_value(key) {
			return Some(value)
		}

		self.base.get_value(key)
	}

	/// Set a value for preview. It takes precedence over everything else until it is committed or reverted.
	pub fn set_value(&mut self, key: &str, value: impl Into<Value>) {
		self.preview.set_value(key, value.into());
	}

	/// Deserialize the table at `key` with all overrides applied.
	/// A missing table deserializes from an empty one, so `#[serde(default)]` types always succeed.
	pub fn section<T>(&self, key: &str) -> anyhow::Result<T>
		where T: serde::de::DeserializeOwned
	{
		let mut resolved = Table::new();

		for layer in [&self.base, &self.arguments, &self.preview] {
			match layer.get_value(key) {
				Some(Value::Table(table)) => resolved.merge_from(table),
				Some(other) => anyhow::bail!("Config value '{key}' is not a table: {other:?}"),
				None => {}
			}
		}

		toml::Value::Table(resolved.to_toml())
			.try_into()
			.with_context(|| format!("Invalid config section '{key}'"))
	}
}


pub fn config_path(app_name: &str) -> anyhow::Result<PathBuf> {
	let mut dir = dirs::preference_dir()
		.context("Couldn't get preferences dir")?;

	dir.push("toybox");
	dir.push(app_name);
	dir.push("config.toml");

	Ok(dir)
}



#[cfg(test)]
mod test {
	use super::*;

	#[derive(Debug, Default, serde::Deserialize)]
	#[serde(default)]
	struct Window {
		width: i64,
		fullscreen: bool,
	}

	fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
		let path = dir.path().join("config.toml");
		std::fs::write(&path, contents).unwrap();
		path
	}

	#[test]
	fn missing_file_is_created() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nested/config.toml");

		let config = Config::from_path(&path, Vec::new()).unwrap();
		assert!(path.exists());
		assert!(config.get_value("anything").is_none());
	}

	#[test]
	fn layers_resolve_in_order() {
		let dir = tempfile::tempdir().unwrap();
		let path = write_config(&dir, "[window]\nwidth = 100\nfullscreen = false\n");

		let mut config = Config::from_path(path, vec!["--window.width=200".to_string()]).unwrap();
		assert_eq!(config.get_value("window.width"), Some(&Value::Integer(200)));

		config.set_value("window.width", 300i64);
		assert_eq!(config.get_value("window.width"), Some(&Value::Integer(300)));

		config.revert();
		assert_eq!(config.get_value("window.width"), Some(&Value::Integer(200)));
		assert_eq!(config.get_value("window.fullscreen"), Some(&Value::Bool(false)));
	}

	#[test]
	fn commit_persists_preview() {
		let dir = tempfile::tempdir().unwrap();
		let path = write_config(&dir, "");

		let mut config = Config::from_path(&path, vec!["--window.width=200".to_string()]).unwrap();
		config.set_value("window.width", 640i64);
		config.commit();
		config.save().unwrap();

		// The committed value also replaces the cli override
		assert_eq!(config.get_value("window.width"), Some(&Value::Integer(640)));

		let reloaded = Config::from_path(&path, Vec::new()).unwrap();
		assert_eq!(reloaded.get_value("window.width"), Some(&Value::Integer(640)));
	}

	#[test]
	fn sections_deserialize_with_overrides() {
		let dir = tempfile::tempdir().unwrap();
		let path = write_config(&dir, "[window]\nwidth = 100\n");

		let config = Config::from_path(path, vec!["--window.fullscreen".to_string()]).unwrap();
		let window: Window = config.section("window").unwrap();
		assert_eq!(window.width, 100);
		assert!(window.fullscreen);

		let missing: Window = config.section("nothing_here").unwrap();
		assert_eq!(missing.width, 0);
	}

	#[test]
	fn non_table_section_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = write_config(&dir, "window = 5\n");

		let config = Config::from_path(path, Vec::new()).unwrap();
		assert!(config.section::<Window>("window").is_err());
	}
}
