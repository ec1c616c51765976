use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// State snapshot to query; `-` or no value reads `terraform state pull` output from stdin
    #[arg(long, global = true, env = "TFPROBE_STATE")]
    pub state: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn state_path(&self) -> Option<&PathBuf> {
        self.state.as_ref().filter(|path| path.as_os_str() != "-")
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List resources by type (and mode) or by name
    Find(FindArgs),
    /// Print the `name` attribute of every instance of a managed resource type
    Names(NamesArgs),
    /// Print one attribute of every instance matching a type or resource name
    Values(ValuesArgs),
    /// Match a regex with named groups against a string
    Capture(CaptureArgs),
    /// Show the snapshot as a module / resource / instance tree
    Tree,
}

#[derive(clap::Args, Debug)]
pub struct FindArgs {
    #[arg(long = "type", required_unless_present = "name", conflicts_with = "name")]
    pub resource_type: Option<String>,

    /// Only applies to `--type`; name lookups span every mode
    #[arg(long, default_value = tfprobe::MANAGED, conflicts_with = "name")]
    pub mode: String,

    /// Matches every resource type; conventional names such as `this` collide
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct NamesArgs {
    #[arg(long = "type")]
    pub resource_type: String,
}

#[derive(clap::Args, Debug)]
pub struct ValuesArgs {
    /// Resource type or resource name
    pub identifier: String,
    pub attribute: String,
}

#[derive(clap::Args, Debug)]
pub struct CaptureArgs {
    pub pattern: String,
    pub input: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_type_defaults_to_managed() {
        let cli = Cli::parse_from(["tfprobe", "find", "--type=azurerm_subnet"]);

        if let Command::Find(args) = cli.command {
            assert_eq!(args.resource_type, Some("azurerm_subnet".to_string()));
            assert_eq!(args.mode, "managed");
            assert!(args.name.is_none());
        } else {
            panic!("Expected Find command, got {:?}", cli.command);
        }
    }

    #[test]
    fn test_find_by_type_and_mode() {
        let cli = Cli::parse_from([
            "tfprobe",
            "find",
            "--type=azurerm_client_config",
            "--mode=data",
        ]);

        if let Command::Find(args) = cli.command {
            assert_eq!(args.mode, "data");
        } else {
            panic!("Expected Find command, got {:?}", cli.command);
        }
    }

    #[test]
    fn test_find_by_name() {
        let cli = Cli::parse_from(["tfprobe", "find", "--name=this"]);

        if let Command::Find(args) = cli.command {
            assert_eq!(args.name, Some("this".to_string()));
            assert!(args.resource_type.is_none());
        } else {
            panic!("Expected Find command, got {:?}", cli.command);
        }
    }

    #[test]
    fn test_find_requires_a_selector() {
        assert!(Cli::try_parse_from(["tfprobe", "find"]).is_err());
    }

    #[test]
    fn test_find_rejects_type_and_name_together() {
        let result = Cli::try_parse_from(["tfprobe", "find", "--type=a", "--name=b"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_find_rejects_mode_with_name() {
        let result = Cli::try_parse_from(["tfprobe", "find", "--name=this", "--mode=data"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_values_positionals_and_global_state() {
        let cli = Cli::parse_from([
            "tfprobe",
            "values",
            "azurerm_key_vault",
            "sku_name",
            "--state=terraform.tfstate",
        ]);

        assert_eq!(cli.state_path(), Some(&PathBuf::from("terraform.tfstate")));
        if let Command::Values(args) = cli.command {
            assert_eq!(args.identifier, "azurerm_key_vault");
            assert_eq!(args.attribute, "sku_name");
        } else {
            panic!("Expected Values command, got {:?}", cli.command);
        }
    }

    #[test]
    fn test_dash_state_means_stdin() {
        let cli = Cli::parse_from(["tfprobe", "--state=-", "tree"]);
        assert!(cli.state_path().is_none());
        assert!(matches!(cli.command, Command::Tree));
    }
}
