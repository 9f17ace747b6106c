use ahash::AHashMap;
use tracing::info;

use crate::{
    TripleError,
    api::{self, Direction, SearchMethod},
    config::QueryConfig,
    loader,
    table::{Column, Table},
};

const DEFAULT_REL_SQL: &str = "SELECT head, relation, tail FROM relation_triples";
const DEFAULT_ATTR_SQL: &str = "SELECT head, relation, tail FROM attribute_triples";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLineConfig {
    pub relations: Option<String>,
    pub attributes: Option<String>,
    pub database: Option<String>,
    pub rel_sql: String,
    pub attr_sql: String,
    pub config: Option<String>,
    pub command: String,
    pub command_args: Vec<String>,
}

impl CommandLineConfig {
    pub fn from_args(args: &[&str]) -> Result<Self, String> {
        let mut relations = None;
        let mut attributes = None;
        let mut database = None;
        let mut rel_sql = DEFAULT_REL_SQL.to_string();
        let mut attr_sql = DEFAULT_ATTR_SQL.to_string();
        let mut config = None;
        let mut command = None;
        let mut command_args = Vec::new();
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            if command.is_some() {
                command_args.push(arg.to_string());
                continue;
            }
            match *arg {
                "--rel" => relations = Some(flag_value(&mut iter, "--rel")?),
                "--attr" => attributes = Some(flag_value(&mut iter, "--attr")?),
                "--db" | "--database" => database = Some(flag_value(&mut iter, "--db")?),
                "--rel-sql" => rel_sql = flag_value(&mut iter, "--rel-sql")?,
                "--attr-sql" => attr_sql = flag_value(&mut iter, "--attr-sql")?,
                "--config" => config = Some(flag_value(&mut iter, "--config")?),
                other if other.starts_with('-') => {
                    return Err(format!("unknown flag {other}"));
                }
                _ => command = Some(arg.to_string()),
            }
        }
        let command = command.ok_or_else(|| "missing command".to_string())?;
        Ok(Self {
            relations,
            attributes,
            database,
            rel_sql,
            attr_sql,
            config,
            command,
            command_args,
        })
    }

    pub fn help() -> &'static str {
        "Usage: triplequery [--rel FILE] [--attr FILE] [--db PATH [--rel-sql SQL] [--attr-sql SQL]] \
[--config FILE] COMMAND [ARGS]\n\
Commands:\n  \
clean\n  \
select ID... [--column head|relation|tail] [--on rel|attr]\n  \
select-rel RELATION [--on rel|attr]\n  \
select-type TYPE\n  \
search QUERY [--method exact|substring|close]\n  \
neighbors ID [--direction in|out|both]\n  \
neighbor-rel ID [--direction in|out|both] [--keep-self]\n  \
neighbor-attr ID [--direction in|out|both]\n"
    }

    pub fn query_config(&self) -> Result<QueryConfig, TripleError> {
        match &self.config {
            Some(path) => QueryConfig::from_file(path),
            None => Ok(QueryConfig::default()),
        }
    }

    pub fn relation_table(&self) -> Result<Table, TripleError> {
        self.load_table(self.relations.as_deref(), &self.rel_sql, "relation")
    }

    pub fn attribute_table(&self) -> Result<Table, TripleError> {
        self.load_table(self.attributes.as_deref(), &self.attr_sql, "attribute")
    }

    fn load_table(&self, file: Option<&str>, sql: &str, what: &str) -> Result<Table, TripleError> {
        match (file, self.database.as_deref()) {
            (Some(path), _) => loader::from_json_file(path),
            (None, Some(db)) => loader::open_sqlite(db, sql),
            (None, None) => Err(TripleError::invalid_input(format!(
                "no {what} table given, use --{} FILE or --db PATH",
                if what == "relation" { "rel" } else { "attr" }
            ))),
        }
    }
}

fn flag_value<'a, 'b: 'a, I>(iter: &mut I, flag: &str) -> Result<String, String>
where
    I: Iterator<Item = &'a &'b str>,
{
    iter.next()
        .map(|value| value.to_string())
        .ok_or_else(|| format!("{flag} requires a value"))
}

#[derive(Debug, Default)]
struct CommandArgs {
    positional: Vec<String>,
    options: AHashMap<String, String>,
    keep_self: bool,
}

impl CommandArgs {
    fn parse(args: &[String]) -> Result<Self, TripleError> {
        let mut parsed = CommandArgs::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--keep-self" => parsed.keep_self = true,
                flag if flag.starts_with("--") => {
                    let value = iter.next().ok_or_else(|| {
                        TripleError::invalid_input(format!("{flag} requires a value"))
                    })?;
                    parsed
                        .options
                        .insert(flag.trim_start_matches("--").to_string(), value.clone());
                }
                _ => parsed.positional.push(arg.clone()),
            }
        }
        Ok(parsed)
    }

    fn first(&self, what: &str) -> Result<&str, TripleError> {
        self.positional
            .first()
            .map(String::as_str)
            .ok_or_else(|| TripleError::invalid_input(format!("missing {what}")))
    }

    fn direction(&self, config: &QueryConfig) -> Result<Direction, TripleError> {
        self.options
            .get("direction")
            .map_or(Ok(config.direction), |value| value.parse())
    }
}

/// Runs the configured command and returns the lines to print.
pub fn run_command(cli: &CommandLineConfig) -> Result<Vec<String>, TripleError> {
    let config = cli.query_config()?;
    let args = CommandArgs::parse(&cli.command_args)?;
    info!(command = %cli.command, "running command");
    match cli.command.as_str() {
        "clean" => {
            let mut table = cli.attribute_table()?;
            api::clean(&mut table)?;
            Ok(record_lines(&table))
        }
        "select" => {
            if args.positional.is_empty() {
                return Err(TripleError::invalid_input("missing ID"));
            }
            let table = table_for(cli, &args)?;
            let column = match args.options.get("column") {
                Some(name) => Column::from_position(table.resolve_column(name)?)
                    .ok_or_else(|| TripleError::unknown_column(name.as_str()))?,
                None => Column::default(),
            };
            Ok(record_lines(&api::select(
                &table,
                &args.positional,
                column,
            )?))
        }
        "select-rel" => {
            let table = table_for(cli, &args)?;
            Ok(record_lines(&api::select_rel(&table, args.first("RELATION")?)?))
        }
        "select-type" => {
            let table = cli.relation_table()?;
            Ok(record_lines(&api::select_by_type(
                &table,
                args.first("TYPE")?,
                &config.type_relation,
            )?))
        }
        "search" => {
            let table = cli.attribute_table()?;
            let method = args
                .options
                .get("method")
                .map_or(Ok(config.search_method), |value| value.parse::<SearchMethod>())?;
            Ok(record_lines(&api::search_with_cutoff(
                &table,
                args.first("QUERY")?,
                method,
                config.close_cutoff,
            )?))
        }
        "neighbors" => {
            let table = cli.relation_table()?;
            let mut ids: Vec<String> =
                api::neighbor_set(&table, args.first("ID")?, args.direction(&config)?)?
                    .into_iter()
                    .collect();
            ids.sort();
            Ok(ids)
        }
        "neighbor-rel" => {
            let table = cli.relation_table()?;
            let filter_self = config.filter_self && !args.keep_self;
            Ok(record_lines(&api::neighbor_rel_triples(
                &table,
                args.first("ID")?,
                args.direction(&config)?,
                filter_self,
            )?))
        }
        "neighbor-attr" => {
            let rel = cli.relation_table()?;
            let attr = cli.attribute_table()?;
            Ok(record_lines(&api::neighbor_attr_triples(
                &rel,
                &attr,
                args.first("ID")?,
                args.direction(&config)?,
            )?))
        }
        other => Err(TripleError::invalid_input(format!("unknown command {other}"))),
    }
}

fn table_for(cli: &CommandLineConfig, args: &CommandArgs) -> Result<Table, TripleError> {
    match args.options.get("on").map(String::as_str) {
        None | Some("rel") => cli.relation_table(),
        Some("attr") => cli.attribute_table(),
        Some(other) => Err(TripleError::invalid_enum("table", other, "rel, attr")),
    }
}

fn record_lines(table: &Table) -> Vec<String> {
    table
        .records()
        .into_iter()
        .map(|record| serde_json::Value::Object(record).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_before_command() {
        let cfg = CommandLineConfig::from_args(&[
            "triplequery",
            "--rel",
            "rel.json",
            "neighbors",
            "e1",
            "--direction",
            "out",
        ])
        .unwrap();
        assert_eq!(cfg.relations.as_deref(), Some("rel.json"));
        assert_eq!(cfg.command, "neighbors");
        assert_eq!(cfg.command_args, vec!["e1", "--direction", "out"]);
        assert_eq!(cfg.rel_sql, DEFAULT_REL_SQL);
    }

    #[test]
    fn rejects_unknown_flags_and_missing_values() {
        assert!(CommandLineConfig::from_args(&["triplequery", "--bogus"]).is_err());
        assert!(CommandLineConfig::from_args(&["triplequery", "--rel"]).is_err());
        assert!(CommandLineConfig::from_args(&["triplequery"]).is_err());
    }

    #[test]
    fn command_args_split_options_and_positionals() {
        let args = CommandArgs::parse(&[
            "e1".to_string(),
            "--keep-self".to_string(),
            "--direction".to_string(),
            "in".to_string(),
        ])
        .unwrap();
        assert_eq!(args.positional, vec!["e1"]);
        assert!(args.keep_self);
        assert_eq!(
            args.direction(&QueryConfig::default()).unwrap(),
            Direction::In
        );
    }

    #[test]
    fn missing_tables_are_reported() {
        let cfg = CommandLineConfig::from_args(&["triplequery", "neighbors", "e1"]).unwrap();
        assert!(matches!(
            run_command(&cfg),
            Err(TripleError::InvalidInput(_))
        ));
    }
}
