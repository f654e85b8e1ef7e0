use anyhow::Error;

pub fn print_error_chain(err: &Error) {
    // Concatenate the main context message along with its chain of errors
    let error_message = err
        .chain()
        .enumerate()
        .map(|(index, cause)| {
            if index == 0 {
                cause.to_string()
            } else {
                format!("       └> {}", cause)
            }
        })
        .collect::<Vec<String>>()
        .join("\n");

    // Print the error message
    error!("{}", error_message);
}

/// Last `/`-segment of a source table name. HANA calculation views are
/// addressed as `package.path/VIEW_NAME`; artifacts on disk are named by
/// the bare view name.
pub fn table_basename(table: &str) -> &str {
    table.rsplit('/').next().unwrap_or(table)
}
