use colored::*;

pub struct CliTools;

impl CliTools {
    /// Prints a message in green color
    pub fn print_green(message: &str) {
        println!("{}", message.green());
    }

    /// Prints a message in red color
    pub fn print_red(message: &str) {
        eprintln!("{}", message.red());
    }

    /// Relative paths are taken from the current directory.
    pub fn absolute_path(path: &std::path::Path) -> std::io::Result<std::path::PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(std::env::current_dir()?.join(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_absolute_path() {
        assert_eq!(CliTools::absolute_path(Path::new("/tmp/cases")).unwrap(), Path::new("/tmp/cases"));

        let relative = CliTools::absolute_path(Path::new("cases")).unwrap();
        assert!(relative.is_absolute());
        assert!(relative.ends_with("cases"));
    }
}
