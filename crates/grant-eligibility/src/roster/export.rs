use super::{Roster, RosterError};
use crate::eligibility::{EligibilityResult, GrantFamily};
use std::io::Write;
use tracing::info;

impl Roster {
    /// Writes the roster with one column per grant family appended.
    ///
    /// Eligibility columns already present in the input are replaced, so a
    /// previously exported roster can be evaluated again.
    pub fn write_with_eligibility<W: Write>(
        &self,
        results: &[EligibilityResult],
        writer: W,
    ) -> Result<(), RosterError> {
        if results.len() != self.cells.len() {
            return Err(RosterError::RowCountMismatch {
                rows: self.cells.len(),
                results: results.len(),
            });
        }

        let kept: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .filter(|(_, header)| !is_eligibility_column(header))
            .map(|(index, _)| index)
            .collect();

        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header_row: Vec<&str> = kept.iter().map(|&index| &self.headers[index]).collect();
        for family in GrantFamily::ALL {
            header_row.push(family.column());
        }
        csv_writer.write_record(&header_row)?;

        for (cells, result) in self.cells.iter().zip(results) {
            let mut row: Vec<String> = kept
                .iter()
                .map(|&index| cells.get(index).unwrap_or_default().to_string())
                .collect();
            row.extend(
                result
                    .iter()
                    .map(|(_, label)| label.map(ToString::to_string).unwrap_or_default()),
            );
            csv_writer.write_record(&row)?;
        }

        csv_writer.flush()?;
        info!(rows = self.cells.len(), "roster exported with eligibility");
        Ok(())
    }
}

fn is_eligibility_column(header: &str) -> bool {
    GrantFamily::ALL
        .iter()
        .any(|family| family.column().eq_ignore_ascii_case(header.trim()))
}

#[cfg(test)]
mod tests {
    use crate::eligibility::{EligibilityResult, GrantLabel};
    use crate::roster::{RosterError, RosterImporter};
    use std::io::Cursor;

    fn export(csv: &str, results: &[EligibilityResult]) -> String {
        let roster = RosterImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        let mut buffer = Vec::new();
        roster
            .write_with_eligibility(results, &mut buffer)
            .expect("export succeeds");
        String::from_utf8(buffer).expect("utf8 output")
    }

    #[test]
    fn appends_family_columns_and_keeps_extra_cells() {
        let result = EligibilityResult {
            nwo_talent: Some(GrantLabel::until("Veni", 2027)),
            erc: Some(GrantLabel::open_ended("AdG")),
            ..EligibilityResult::default()
        };

        let output = export("First Name,Last name,Remarks\nAda,Lovelace,on leave\n", &[result]);

        assert_eq!(
            output,
            "First Name,Last name,Remarks,Eligible NWO Talent,Eligible NWO OC,Eligible ERC,Eligible MSCA\n\
Ada,Lovelace,on leave,Veni 2027,,AdG,\n"
        );
    }

    #[test]
    fn replaces_stale_eligibility_columns() {
        let output = export(
            "First Name,Eligible ERC,Last name\nAda,StG 2020,Lovelace\n",
            &[EligibilityResult::default()],
        );

        assert_eq!(
            output,
            "First Name,Last name,Eligible NWO Talent,Eligible NWO OC,Eligible ERC,Eligible MSCA\n\
Ada,Lovelace,,,,\n"
        );
    }

    #[test]
    fn short_rows_are_padded() {
        let output = export(
            "First Name,Last name,Remarks\nAda,Lovelace\n",
            &[EligibilityResult::default()],
        );
        assert!(output.ends_with("Ada,Lovelace,,,,,\n"));
    }

    #[test]
    fn rejects_mismatched_result_count() {
        let roster =
            RosterImporter::from_reader(Cursor::new("First Name\nAda\n")).expect("import succeeds");
        let error = roster
            .write_with_eligibility(&[], Vec::new())
            .expect_err("count mismatch");
        assert!(matches!(
            error,
            RosterError::RowCountMismatch {
                rows: 1,
                results: 0
            }
        ));
    }
}
