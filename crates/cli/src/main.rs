use std::io::Read;

use anyhow::Context;

use tallysheet_cli::{CliConfig, FilePresenter, SheetInput, WriterPresenter};
use tallysheet_invoicing::Present;

fn main() -> anyhow::Result<()> {
    tallysheet_observability::init();

    let config = CliConfig::from_env();
    tracing::debug!(
        company = %config.company_name,
        grouping = config.grouping.as_str(),
        negative_input = config.negative_input.as_str(),
        output = ?config.output,
        "configuration loaded"
    );

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read invoice sheet from stdin")?;
    let sheet = SheetInput::from_json(&input).context("invoice sheet is not valid JSON")?;

    let document = tallysheet_cli::render(&config, &sheet)?;

    match &config.output {
        Some(path) => FilePresenter::new(path).present(&document)?,
        None => WriterPresenter::new(std::io::stdout().lock()).present(&document)?,
    }

    Ok(())
}
