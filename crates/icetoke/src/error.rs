#[derive(thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("no samples to aggregate")]
    EmptyInput,
    #[error("unable to load corpus at {}: {reason}", row_label(.row))]
    CorpusLoad { row: usize, reason: String },
    #[error("io error")]
    Io(#[from] std::io::Error),
    #[error("csv error")]
    Csv(#[from] csv::Error),
    #[error("unable to serialize to json")]
    Json(#[from] serde_json::Error),
    #[error("unable to serialize to yaml")]
    Yaml(#[from] serde_yaml::Error),
    #[error("config file error")]
    ConfigFile(#[from] config_file::ConfigFileError),
    #[error("tokenizer error")]
    Tokenizer(#[from] tokenizer::Error),
    #[error("invalid progress bar template")]
    ProgressTemplate(#[from] indicatif::style::TemplateError),
    #[error("unknown pricing tier `{0}`")]
    UnknownTier(String),
    #[error("unknown document preset `{0}`")]
    UnknownPreset(String),
}

/// Row 0 is the header line, data rows start at 1.
fn row_label(row: &usize) -> String {
    match row {
        0 => "header".to_string(),
        n => format!("row {n}"),
    }
}

pub(crate) fn format_error(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter,
) -> std::fmt::Result {
    write!(f, "{e}")?;

    let mut source = e.source();

    if e.source().is_some() {
        writeln!(f, "\ncaused by:")?;
        let mut i: usize = 0;
        while let Some(inner) = source {
            writeln!(f, "{i: >5}: {inner}")?;
            source = inner.source();
            i += 1;
        }
    }

    Ok(())
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format_error(self, f)
    }
}
