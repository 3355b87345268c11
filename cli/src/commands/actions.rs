use std::io::Write;

use deploy_core::api::{Action, CliError};

pub fn handle_actions(out: &mut impl Write) -> Result<(), CliError> {
    for action in Action::ALL {
        writeln!(out, "{:<24} {}", action.as_str(), action.error_message())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_all_actions() {
        let mut buf = Vec::new();
        handle_actions(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 8);
        assert!(text.contains("project.replaceVersion"));
        assert!(text.lines().next().unwrap().starts_with("npm.build"));
    }
}
