use thiserror::Error;

/// The only way URL generation can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("host is empty")]
    MissingHost,
}

/// A single query parameter row. Identity is its index in the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamRow {
    pub key: String,
    pub value: String,
}

impl ParamRow {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Both key and value are empty.
    pub fn is_blank(&self) -> bool {
        self.key.is_empty() && self.value.is_empty()
    }
}

/// What happened to the edited row after a key/value edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Kept,
    /// The row was blank and redundant, so it was removed.
    Removed,
}

/// Compose a URL from raw parts: `host[/route][?k=v[&k=v...]]`.
///
/// Nothing is trimmed or percent-encoded. Every row contributes a pair,
/// blank rows included, so a single blank row yields a trailing `?=`.
pub fn compose_url(host: &str, route: &str, params: &[ParamRow]) -> Result<String, UrlError> {
    if host.is_empty() {
        return Err(UrlError::MissingHost);
    }

    let mut url = String::from(host);
    if !route.is_empty() {
        url.push('/');
        url.push_str(route);
    }

    for (i, param) in params.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(&param.key);
        url.push('=');
        url.push_str(&param.value);
    }

    Ok(url)
}

/// The form contents: host, route and an ordered list of parameter rows.
///
/// The row list is never empty: it starts with one blank row and pruning
/// only removes a blank row while another blank row remains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    host: String,
    route: String,
    params: Vec<ParamRow>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        Self {
            host: String::new(),
            route: String::new(),
            params: vec![ParamRow::default()],
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn params(&self) -> &[ParamRow] {
        &self.params
    }

    pub fn param(&self, index: usize) -> Option<&ParamRow> {
        self.params.get(index)
    }

    /// Number of parameter rows.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn set_host(&mut self, text: impl Into<String>) {
        self.host = text.into();
    }

    pub fn set_route(&mut self, text: impl Into<String>) {
        self.route = text.into();
    }

    /// Replace the key of row `index`, then prune it if it became a redundant blank.
    ///
    /// # Panics
    /// If `index` is out of range.
    pub fn edit_param_key(&mut self, index: usize, text: impl Into<String>) -> EditOutcome {
        self.params[index].key = text.into();
        self.prune_if_redundant(index)
    }

    /// Replace the value of row `index`, then prune it if it became a redundant blank.
    ///
    /// # Panics
    /// If `index` is out of range.
    pub fn edit_param_value(&mut self, index: usize, text: impl Into<String>) -> EditOutcome {
        self.params[index].value = text.into();
        self.prune_if_redundant(index)
    }

    /// Append a blank row at the end.
    pub fn add_param_row(&mut self) {
        self.params.push(ParamRow::default());
        tracing::debug!(rows = self.params.len(), "param row added");
    }

    pub fn blank_row_count(&self) -> usize {
        self.params.iter().filter(|p| p.is_blank()).count()
    }

    pub fn has_blank_row(&self) -> bool {
        self.params.iter().any(ParamRow::is_blank)
    }

    /// Adding is offered only while every row has content.
    pub fn can_add_row(&self) -> bool {
        !self.has_blank_row()
    }

    pub fn generate_url(&self) -> Result<String, UrlError> {
        compose_url(&self.host, &self.route, &self.params)
    }

    /// Only the just-edited row is a candidate; other blank rows wait for their own edit.
    fn prune_if_redundant(&mut self, index: usize) -> EditOutcome {
        if self.blank_row_count() <= 1 {
            return EditOutcome::Kept;
        }
        if self.params[index].is_blank() {
            self.params.remove(index);
            tracing::debug!(index, rows = self.params.len(), "blank param row pruned");
            return EditOutcome::Removed;
        }
        EditOutcome::Kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(host: &str, route: &str, rows: &[(&str, &str)]) -> FormState {
        FormState {
            host: host.to_string(),
            route: route.to_string(),
            params: rows.iter().map(|(k, v)| ParamRow::new(*k, *v)).collect(),
        }
    }

    #[test]
    fn test_new_has_one_blank_row() {
        let state = FormState::new();
        assert_eq!(state.len(), 1);
        assert!(state.params()[0].is_blank());
        assert!(state.host().is_empty());
        assert!(state.route().is_empty());
    }

    #[test]
    fn test_missing_host() {
        assert_eq!(
            compose_url("", "x", &[ParamRow::new("a", "1")]),
            Err(UrlError::MissingHost)
        );
        assert_eq!(compose_url("", "", &[]), Err(UrlError::MissingHost));
        assert_eq!(FormState::new().generate_url(), Err(UrlError::MissingHost));
    }

    #[test]
    fn test_host_only_without_rows() {
        assert_eq!(compose_url("a.com", "", &[]).unwrap(), "a.com");
    }

    #[test]
    fn test_route_and_single_param() {
        let state = form("a.com", "x", &[("a", "1")]);
        assert_eq!(state.generate_url().unwrap(), "a.com/x?a=1");
    }

    #[test]
    fn test_params_joined_in_order() {
        let state = form("a.com", "", &[("a", "1"), ("b", "2")]);
        assert_eq!(state.generate_url().unwrap(), "a.com?a=1&b=2");
    }

    #[test]
    fn test_blank_rows_are_not_filtered() {
        let mut state = FormState::new();
        state.set_host("a.com");
        assert_eq!(state.generate_url().unwrap(), "a.com?=");

        let state = form("a.com", "", &[("a", "1"), ("", "")]);
        assert_eq!(state.generate_url().unwrap(), "a.com?a=1&=");
    }

    #[test]
    fn test_fields_are_verbatim() {
        let state = form(" myapp://open ", "a b/c", &[("q", "x&y=z"), ("", "v")]);
        assert_eq!(
            state.generate_url().unwrap(),
            " myapp://open /a b/c?q=x&y=z&=v"
        );
    }

    #[test]
    fn test_generate_is_pure() {
        let state = form("a.com", "x", &[("a", "1"), ("b", "")]);
        let first = state.generate_url().unwrap();
        let second = state.generate_url().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_clearing_only_row_keeps_it() {
        let mut state = FormState::new();
        state.edit_param_key(0, "a");
        assert_eq!(state.edit_param_key(0, ""), EditOutcome::Kept);
        assert_eq!(state.len(), 1);
        assert!(state.params()[0].is_blank());
    }

    #[test]
    fn test_redundant_blank_removed_on_edit() {
        let mut state = form("", "", &[("", ""), ("", "")]);
        assert_eq!(state.edit_param_value(1, ""), EditOutcome::Removed);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_filling_one_of_two_blanks_keeps_both() {
        let mut state = form("", "", &[("", ""), ("", "")]);
        assert_eq!(state.edit_param_key(0, "a"), EditOutcome::Kept);
        assert_eq!(state.len(), 2);
        assert_eq!(state.params()[0], ParamRow::new("a", ""));
        assert!(state.params()[1].is_blank());
    }

    #[test]
    fn test_prune_removes_edited_row_not_first_blank() {
        let mut state = form("", "", &[("", ""), ("a", "1"), ("", "x")]);
        assert_eq!(state.edit_param_value(2, ""), EditOutcome::Removed);
        assert_eq!(
            state.params(),
            &[ParamRow::new("", ""), ParamRow::new("a", "1")]
        );
    }

    #[test]
    fn test_other_blank_rows_left_alone() {
        let mut state = form("", "", &[("", ""), ("", ""), ("", ""), ("k", "")]);
        // Editing a non-blank row never prunes, even with many blanks around
        assert_eq!(state.edit_param_value(3, "v"), EditOutcome::Kept);
        assert_eq!(state.len(), 4);
        // Each blank goes only when it is itself edited
        assert_eq!(state.edit_param_key(0, ""), EditOutcome::Removed);
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn test_add_row_and_can_add() {
        let mut state = FormState::new();
        assert!(!state.can_add_row());
        state.edit_param_key(0, "a");
        assert!(state.can_add_row());
        state.add_param_row();
        assert_eq!(state.len(), 2);
        assert!(state.params()[1].is_blank());
        assert!(!state.can_add_row());
        assert_eq!(state.blank_row_count(), 1);
    }

    #[test]
    fn test_add_row_is_unconditional() {
        let mut state = FormState::new();
        state.add_param_row();
        assert_eq!(state.len(), 2);
        assert_eq!(state.blank_row_count(), 2);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_edit_panics() {
        let mut state = FormState::new();
        state.edit_param_key(5, "a");
    }
}
