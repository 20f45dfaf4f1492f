use std::fmt;

use crate::appointment::ServiceLine;

/// One row of the new-appointment service form, still string-typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceDraft {
    pub name: String,
    pub price: String,
    /// Commission in whole percent ("50" = 50%). Empty means none.
    pub commission: String,
}

/// Field-level validation failure for a service row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    MissingName(usize),
    MissingPrice(usize),
    BadPrice(usize),
    BadCommission(usize),
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::MissingName(i) => write!(f, "Service {} needs a name", i + 1),
            DraftError::MissingPrice(i) => write!(f, "Service {} needs a price", i + 1),
            DraftError::BadPrice(i) => write!(f, "Service {} has an invalid price", i + 1),
            DraftError::BadCommission(i) => {
                write!(f, "Service {} commission must be between 0 and 100", i + 1)
            }
        }
    }
}

/// Ordered service rows with immutable update operations: every edit
/// returns a new list, so callers can hold the previous value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDraftList(Vec<ServiceDraft>);

impl Default for ServiceDraftList {
    /// The form always starts with one empty row.
    fn default() -> Self {
        Self(vec![ServiceDraft::default()])
    }
}

impl ServiceDraftList {
    pub fn rows(&self) -> &[ServiceDraft] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// With a fresh empty row appended.
    pub fn added(&self) -> Self {
        let mut rows = self.0.clone();
        rows.push(ServiceDraft::default());
        Self(rows)
    }

    /// With row `index` removed. The list never drops below one row, and an
    /// out-of-range index is a no-op.
    pub fn removed(&self, index: usize) -> Self {
        if self.0.len() <= 1 || index >= self.0.len() {
            return self.clone();
        }
        let mut rows = self.0.clone();
        rows.remove(index);
        Self(rows)
    }

    pub fn with_name(&self, index: usize, name: impl Into<String>) -> Self {
        self.with_row(index, |row| row.name = name.into())
    }

    pub fn with_price(&self, index: usize, price: impl Into<String>) -> Self {
        self.with_row(index, |row| row.price = price.into())
    }

    pub fn with_commission(&self, index: usize, commission: impl Into<String>) -> Self {
        self.with_row(index, |row| row.commission = commission.into())
    }

    fn with_row(&self, index: usize, edit: impl FnOnce(&mut ServiceDraft)) -> Self {
        let mut rows = self.0.clone();
        if let Some(row) = rows.get_mut(index) {
            edit(row);
        }
        Self(rows)
    }

    /// Running total of the parseable prices, for live display while the
    /// form is incomplete.
    pub fn total(&self) -> f64 {
        self.0
            .iter()
            .filter_map(|row| row.price.trim().parse::<f64>().ok())
            .sum()
    }

    /// Validate every row and produce the wire service lines. Empty
    /// commission becomes 0; the percent input is converted to a fraction.
    pub fn parse(&self) -> Result<Vec<ServiceLine>, DraftError> {
        let mut services = Vec::with_capacity(self.0.len());
        for (i, row) in self.0.iter().enumerate() {
            let name = row.name.trim();
            if name.is_empty() {
                return Err(DraftError::MissingName(i));
            }
            let price_raw = row.price.trim();
            if price_raw.is_empty() {
                return Err(DraftError::MissingPrice(i));
            }
            let price: f64 = price_raw.parse().map_err(|_| DraftError::BadPrice(i))?;
            if !price.is_finite() || price < 0.0 {
                return Err(DraftError::BadPrice(i));
            }
            let commission_raw = row.commission.trim();
            let commission_percent = if commission_raw.is_empty() {
                0.0
            } else {
                let percent: f64 = commission_raw
                    .parse()
                    .map_err(|_| DraftError::BadCommission(i))?;
                if !(0.0..=100.0).contains(&percent) {
                    return Err(DraftError::BadCommission(i));
                }
                percent / 100.0
            };
            services.push(ServiceLine {
                name: name.to_string(),
                price,
                commission_percent: Some(commission_percent),
            });
        }
        Ok(services)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_one_empty_row() {
        let list = ServiceDraftList::default();
        assert_eq!(list.len(), 1);
        assert_eq!(list.rows()[0], ServiceDraft::default());
    }

    #[test]
    fn edits_return_new_lists_without_touching_the_original() {
        let original = ServiceDraftList::default();
        let edited = original
            .with_name(0, "Corte")
            .with_price(0, "25.00")
            .added()
            .with_name(1, "Barba");

        assert_eq!(original.rows()[0], ServiceDraft::default());
        assert_eq!(edited.len(), 2);
        assert_eq!(edited.rows()[0].name, "Corte");
        assert_eq!(edited.rows()[1].name, "Barba");
    }

    #[test]
    fn removal_never_drops_the_last_row() {
        let list = ServiceDraftList::default();
        assert_eq!(list.removed(0), list);

        let two = list.added().with_name(1, "Barba");
        let one = two.removed(0);
        assert_eq!(one.len(), 1);
        assert_eq!(one.rows()[0].name, "Barba");

        assert_eq!(two.removed(5), two);
    }

    #[test]
    fn out_of_range_edits_are_no_ops() {
        let list = ServiceDraftList::default();
        assert_eq!(list.with_name(3, "x"), list);
    }

    #[test]
    fn total_sums_only_parseable_prices() {
        let list = ServiceDraftList::default()
            .with_price(0, "25.50")
            .added()
            .with_price(1, "not a number")
            .added()
            .with_price(2, " 20 ");
        assert_eq!(list.total(), 45.5);
    }

    #[test]
    fn parse_validates_and_converts_commission() {
        let list = ServiceDraftList::default()
            .with_name(0, "Corte + Barba")
            .with_price(0, "45.00")
            .with_commission(0, "50");
        let services = list.parse().unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].price, 45.0);
        assert_eq!(services[0].commission_percent, Some(0.5));

        let no_commission = ServiceDraftList::default()
            .with_name(0, "Corte")
            .with_price(0, "25");
        assert_eq!(
            no_commission.parse().unwrap()[0].commission_percent,
            Some(0.0)
        );
    }

    #[test]
    fn parse_reports_the_offending_row() {
        let list = ServiceDraftList::default()
            .with_name(0, "Corte")
            .with_price(0, "25")
            .added();
        assert_eq!(list.parse(), Err(DraftError::MissingName(1)));

        let bad_price = ServiceDraftList::default()
            .with_name(0, "Corte")
            .with_price(0, "abc");
        assert_eq!(bad_price.parse(), Err(DraftError::BadPrice(0)));

        let bad_commission = ServiceDraftList::default()
            .with_name(0, "Corte")
            .with_price(0, "25")
            .with_commission(0, "150");
        assert_eq!(bad_commission.parse(), Err(DraftError::BadCommission(0)));
    }
}
