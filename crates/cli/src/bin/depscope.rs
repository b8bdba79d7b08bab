use anyhow::Result;

fn main() -> Result<()> {
    depscope_cli::main_entry()
}
