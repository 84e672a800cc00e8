use serde::Deserialize;

/// Language of the prompts shown to the user.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
  #[default]
  Es,
  En
}

impl Locale {
  pub fn parse(
    raw: &str
  ) -> Option<Self> {
    match raw
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "es" => Some(Locale::Es),
      | "en" => Some(Locale::En),
      | _ => None
    }
  }

  pub fn delete_prompt(
    self
  ) -> &'static str {
    match self {
      | Locale::Es => {
        "¿Está seguro que desea \
         eliminar esta tarea?"
      }
      | Locale::En => {
        "Are you sure you want to \
         delete this task?"
      }
    }
  }

  pub fn toggle_prompt(
    self,
    title: &str,
    completed: bool
  ) -> String {
    match (self, completed) {
      | (Locale::Es, true) => {
        format!(
          "¿Marcar \"{title}\" como \
           pendiente?"
        )
      }
      | (Locale::Es, false) => {
        format!(
          "¿Marcar \"{title}\" como \
           completada?"
        )
      }
      | (Locale::En, true) => {
        format!(
          "Mark \"{title}\" as pending?"
        )
      }
      | (Locale::En, false) => {
        format!(
          "Mark \"{title}\" as \
           completed?"
        )
      }
    }
  }

  pub fn required_fields_alert(
    self
  ) -> &'static str {
    match self {
      | Locale::Es => {
        "Por favor complete todos los \
         campos obligatorios"
      }
      | Locale::En => {
        "Please complete all required \
         fields."
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn toggle_prompt_follows_completion_flag() {
    assert_eq!(
      Locale::En
        .toggle_prompt("Report", true),
      "Mark \"Report\" as pending?"
    );
    assert_eq!(
      Locale::Es
        .toggle_prompt("Informe", false),
      "¿Marcar \"Informe\" como completada?"
    );
  }

  #[test]
  fn locale_parse_is_case_insensitive() {
    assert_eq!(
      Locale::parse(" EN "),
      Some(Locale::En)
    );
    assert_eq!(Locale::parse("fr"), None);
  }
}
