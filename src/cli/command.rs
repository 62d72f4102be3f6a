use crate::core::{Result, ShellError};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Info,
    Show,
    Add,
    Update(i64),
    RemoveById(i64),
    Clear,
    Save,
    ExecuteScript(PathBuf),
    Exit,
    AddIfMax,
    AddIfMin,
    RemoveLower,
    GroupCountingByEnginePower,
    FilterByNumberOfWheels(i64),
    PrintFieldAscendingNumberOfWheels,
}

/// Command name, argument placeholder and description, in help order.
pub const COMMANDS: &[(&str, &str, &str)] = &[
    ("help", "", "show available commands"),
    ("info", "", "show collection information (type, initialization date, size)"),
    ("show", "", "show all elements"),
    ("add", "{element}", "add a new element to the collection"),
    ("update", "id {element}", "update the element with the given id"),
    ("remove_by_id", "id", "remove the element with the given id"),
    ("clear", "", "remove all elements from the collection"),
    ("save", "", "save the collection to the data file"),
    ("execute_script", "file_name", "execute commands from a file"),
    ("exit", "", "exit without saving"),
    ("add_if_max", "{element}", "add the element if it is greater than the maximum element"),
    ("add_if_min", "{element}", "add the element if it is less than the minimum element"),
    ("remove_lower", "{element}", "remove all elements less than the given one"),
    (
        "group_counting_by_engine_power",
        "",
        "group elements by engine power and show the count of each group",
    ),
    (
        "filter_by_number_of_wheels",
        "number_of_wheels",
        "show elements with the given number of wheels",
    ),
    (
        "print_field_ascending_number_of_wheels",
        "",
        "show the number of wheels of all elements in ascending order",
    ),
];

impl Command {
    /// Tokenize `line` on whitespace and resolve the command.
    ///
    /// `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, args)) = tokens.split_first() else {
            return Ok(None);
        };

        let command = match name {
            "help" => no_args(name, args, Command::Help)?,
            "info" => no_args(name, args, Command::Info)?,
            "show" => no_args(name, args, Command::Show)?,
            "add" => no_args(name, args, Command::Add)?,
            "update" => Command::Update(int_arg(name, args, "id")?),
            "remove_by_id" => Command::RemoveById(int_arg(name, args, "id")?),
            "clear" => no_args(name, args, Command::Clear)?,
            "save" => no_args(name, args, Command::Save)?,
            "execute_script" => Command::ExecuteScript(PathBuf::from(one_arg(name, args, "file_name")?)),
            "exit" => no_args(name, args, Command::Exit)?,
            "add_if_max" => no_args(name, args, Command::AddIfMax)?,
            "add_if_min" => no_args(name, args, Command::AddIfMin)?,
            "remove_lower" => no_args(name, args, Command::RemoveLower)?,
            "group_counting_by_engine_power" => {
                no_args(name, args, Command::GroupCountingByEnginePower)?
            }
            "filter_by_number_of_wheels" => {
                Command::FilterByNumberOfWheels(int_arg(name, args, "number_of_wheels")?)
            }
            "print_field_ascending_number_of_wheels" => {
                no_args(name, args, Command::PrintFieldAscendingNumberOfWheels)?
            }
            unknown => return Err(ShellError::UnknownCommand(unknown.to_string())),
        };
        Ok(Some(command))
    }

    pub fn help_text() -> String {
        let mut text = String::from("Available commands:\n");
        for (name, args, description) in COMMANDS {
            if args.is_empty() {
                text.push_str(&format!("{} - {}\n", name, description));
            } else {
                text.push_str(&format!("{} {} - {}\n", name, args, description));
            }
        }
        text
    }
}

fn no_args(name: &str, args: &[&str], command: Command) -> Result<Command> {
    if !args.is_empty() {
        return Err(ShellError::Usage(format!("'{}' takes no arguments", name)));
    }
    Ok(command)
}

fn one_arg<'a>(name: &str, args: &[&'a str], placeholder: &str) -> Result<&'a str> {
    match args {
        [arg] => Ok(*arg),
        _ => Err(ShellError::Usage(format!("{} {}", name, placeholder))),
    }
}

fn int_arg(name: &str, args: &[&str], placeholder: &str) -> Result<i64> {
    let raw = one_arg(name, args, placeholder)?;
    raw.parse::<i64>().map_err(|_| {
        ShellError::Usage(format!(
            "{} {} ('{}' is not an integer)",
            name, placeholder, raw
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   \t ").unwrap(), None);
    }

    #[test]
    fn test_parse_with_arguments() {
        assert_eq!(Command::parse("update 5").unwrap(), Some(Command::Update(5)));
        assert_eq!(
            Command::parse("  filter_by_number_of_wheels   4 ").unwrap(),
            Some(Command::FilterByNumberOfWheels(4))
        );
        assert_eq!(
            Command::parse("execute_script scripts/a.txt").unwrap(),
            Some(Command::ExecuteScript(PathBuf::from("scripts/a.txt")))
        );
    }

    #[test]
    fn test_parse_usage_errors() {
        assert!(matches!(Command::parse("update"), Err(ShellError::Usage(_))));
        assert!(matches!(Command::parse("update x"), Err(ShellError::Usage(_))));
        assert!(matches!(Command::parse("remove_by_id 1 2"), Err(ShellError::Usage(_))));
        assert!(matches!(Command::parse("show all"), Err(ShellError::Usage(_))));
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = Command::parse("fly").unwrap_err();
        assert!(matches!(err, ShellError::UnknownCommand(ref name) if name == "fly"));
        assert!(err.to_string().contains("Type help"));
    }

    #[test]
    fn test_help_lists_every_command() {
        let help = Command::help_text();
        for (name, _, _) in COMMANDS {
            assert!(help.contains(name));
        }
        assert_eq!(COMMANDS.len(), 16);
    }
}
