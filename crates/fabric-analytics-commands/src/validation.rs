use crate::command::OptionDefinition;
use crate::Error;

/// Collects every missing required option before failing, so a single error names all of them
#[derive(Debug, Default)]
pub struct Validator {
    missing: Vec<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value when present and not blank. Otherwise records the option as missing
    /// and returns an empty placeholder that [`Validator::finish`] will never let through.
    pub fn required(&mut self, option: &OptionDefinition, value: Option<String>) -> String {
        match value.filter(|x| !x.trim().is_empty()) {
            Some(value) => value,
            None => {
                self.missing.push(option.name.to_string());
                String::new()
            },
        }
    }

    pub fn finish(self) -> Result<(), Error> {
        if self.missing.is_empty() {
            return Ok(());
        }

        Err(Error::MissingOptions(self.missing))
    }
}
