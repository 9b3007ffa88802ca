//! T-SQL fragment builders shared by the procedure templates.

use crate::catalog::KeyColumn;

/// A procedure parameter: name plus rendered SQL type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    pub name: String,
    pub sql_type: String,
}

/// Bracket-delimit an identifier for the generated text.
pub fn bracket(name: &str) -> String {
    format!("[{name}]")
}

/// Render a declared type with its character length, `-1` meaning MAX.
pub fn sql_type(data_type: &str, char_length: Option<i32>) -> String {
    match char_length {
        Some(-1) => format!("{data_type}(MAX)"),
        Some(n) if n > 0 => format!("{data_type}({n})"),
        _ => data_type.to_string(),
    }
}

/// Equality conjunction over every key column: `[A] = @A AND [B] = @B`.
pub fn key_predicate(key: &[KeyColumn]) -> String {
    key.iter()
        .map(|k| format!("[{0}] = @{0}", k.name))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// Guard for the keyset branch: any key parameter supplied.
pub fn keyset_guard(key: &[KeyColumn]) -> String {
    key.iter()
        .map(|k| format!("@{} IS NOT NULL", k.name))
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// Column side of the keyset comparison.
///
/// Single-column keys compare the column directly. Composite keys pick the
/// column belonging to the first non-null key parameter in key-ordinal
/// order via a CASE chain; this is not a lexicographic tuple comparison.
pub fn keyset_column_expr(key: &[KeyColumn]) -> String {
    if key.len() == 1 {
        return bracket(&key[0].name);
    }
    case_chain(key, |k| bracket(&k.name))
}

/// Cursor side of the keyset comparison; mirrors [`keyset_column_expr`] so
/// the same key parameter supplies both column choice and cursor value.
pub fn keyset_value_expr(key: &[KeyColumn]) -> String {
    if key.len() == 1 {
        return format!("@{}", key[0].name);
    }
    case_chain(key, |k| format!("@{}", k.name))
}

fn case_chain(key: &[KeyColumn], arm: impl Fn(&KeyColumn) -> String) -> String {
    let mut expr = String::from("CASE");
    let (last, rest) = match key.split_last() {
        Some(split) => split,
        None => return expr + " END",
    };
    for k in rest {
        expr.push_str(&format!(" WHEN @{} IS NOT NULL THEN {}", k.name, arm(k)));
    }
    expr.push_str(&format!(" ELSE {} END", arm(last)));
    expr
}

/// Search predicate gated on `@SearchTerm`, ANDed into every Select branch
/// when the table exposes the configured search column.
pub fn search_predicate(search_column: &str) -> String {
    format!("(@SearchTerm IS NULL OR [{search_column}] LIKE '%' + @SearchTerm + '%')")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(names: &[&str]) -> Vec<KeyColumn> {
        names
            .iter()
            .map(|n| KeyColumn {
                name: n.to_string(),
                data_type: "INT".to_string(),
                char_length: None,
            })
            .collect()
    }

    #[test]
    fn test_sql_type_rendering() {
        assert_eq!(sql_type("INT", None), "INT");
        assert_eq!(sql_type("NVARCHAR", Some(255)), "NVARCHAR(255)");
        assert_eq!(sql_type("NVARCHAR", Some(-1)), "NVARCHAR(MAX)");
        assert_eq!(sql_type("DATETIME", Some(0)), "DATETIME");
    }

    #[test]
    fn test_key_predicate_conjunction() {
        assert_eq!(key_predicate(&key(&["Id"])), "[Id] = @Id");
        assert_eq!(
            key_predicate(&key(&["OrderId", "LineNo"])),
            "[OrderId] = @OrderId AND [LineNo] = @LineNo"
        );
    }

    #[test]
    fn test_single_key_compares_directly() {
        let k = key(&["Id"]);
        assert_eq!(keyset_column_expr(&k), "[Id]");
        assert_eq!(keyset_value_expr(&k), "@Id");
    }

    #[test]
    fn test_composite_key_case_chain_honors_key_order() {
        let k = key(&["OrderId", "LineNo"]);
        assert_eq!(
            keyset_column_expr(&k),
            "CASE WHEN @OrderId IS NOT NULL THEN [OrderId] ELSE [LineNo] END"
        );
        assert_eq!(
            keyset_value_expr(&k),
            "CASE WHEN @OrderId IS NOT NULL THEN @OrderId ELSE @LineNo END"
        );
        assert_eq!(
            keyset_guard(&k),
            "@OrderId IS NOT NULL OR @LineNo IS NOT NULL"
        );
    }

    #[test]
    fn test_three_column_case_chain() {
        let k = key(&["A", "B", "C"]);
        assert_eq!(
            keyset_column_expr(&k),
            "CASE WHEN @A IS NOT NULL THEN [A] WHEN @B IS NOT NULL THEN [B] ELSE [C] END"
        );
    }

    #[test]
    fn test_search_predicate() {
        assert_eq!(
            search_predicate("SearchField"),
            "(@SearchTerm IS NULL OR [SearchField] LIKE '%' + @SearchTerm + '%')"
        );
    }
}
