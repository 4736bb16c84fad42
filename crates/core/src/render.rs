//! Read path for entries and patients.
//!
//! [`render_entry`] is the mirror of [`crate::builder::build_entry`]: it dispatches on the entry
//! kind and produces a view holding exactly that kind's fields. The match over
//! [`EntryDetails`] has no wildcard arm, so a new kind does not compile until it is rendered
//! here.

use crate::diagnosis::{DiagnosisLookup, Resolution};
use crate::entry::{Discharge, Entry, EntryDetails, HealthCheckRating, SickLeave};
use crate::patient::Patient;
use std::fmt;

/// Icon summarising an entry's kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindIcon {
    /// Health checks show their rating as a coloured heart.
    HealthCheck(HealthCheckRating),
    OccupationalHealthcare,
    Hospital,
}

impl KindIcon {
    pub fn symbol(&self) -> &'static str {
        match self {
            KindIcon::HealthCheck(_) => "🩺",
            KindIcon::OccupationalHealthcare => "💼",
            KindIcon::Hospital => "🏥",
        }
    }
}

fn heart(rating: HealthCheckRating) -> &'static str {
    match rating {
        HealthCheckRating::Healthy => "💚",
        HealthCheckRating::LowRisk => "💛",
        HealthCheckRating::HighRisk => "🧡",
        HealthCheckRating::CriticalRisk => "❤️",
    }
}

/// Kind-specific block below the shared fields. Health checks have none.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailBlock<'a> {
    OccupationalHealthcare {
        employer_name: &'a str,
        sick_leave: Option<&'a SickLeave>,
    },
    Hospital {
        discharge: &'a Discharge,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagnosisLine<'a> {
    pub code: &'a str,
    pub resolution: Resolution<'a>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryView<'a> {
    pub id: &'a str,
    pub icon: KindIcon,
    pub date: &'a str,
    pub description: &'a str,
    pub specialist: &'a str,
    pub detail: Option<DetailBlock<'a>>,
    pub diagnoses: Vec<DiagnosisLine<'a>>,
}

pub fn render_entry<'a>(entry: &'a Entry, lookup: &'a DiagnosisLookup) -> EntryView<'a> {
    let (icon, detail) = match entry.details() {
        EntryDetails::HealthCheck(details) => {
            (KindIcon::HealthCheck(details.health_check_rating), None)
        }
        EntryDetails::OccupationalHealthcare(details) => (
            KindIcon::OccupationalHealthcare,
            Some(DetailBlock::OccupationalHealthcare {
                employer_name: &details.employer_name,
                sick_leave: details.sick_leave.as_ref(),
            }),
        ),
        EntryDetails::Hospital(details) => (
            KindIcon::Hospital,
            Some(DetailBlock::Hospital {
                discharge: &details.discharge,
            }),
        ),
    };

    let diagnoses = entry
        .diagnosis_codes()
        .iter()
        .map(|code| DiagnosisLine {
            code: code.as_str(),
            resolution: lookup.resolve(code),
        })
        .collect();

    EntryView {
        id: &entry.id,
        icon,
        date: &entry.draft.date,
        description: &entry.draft.description,
        specialist: &entry.draft.specialist,
        detail,
        diagnoses,
    }
}

impl fmt::Display for EntryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.date, self.icon.symbol())?;
        writeln!(f, "  {}", self.description)?;

        if let KindIcon::HealthCheck(rating) = self.icon {
            writeln!(f, "  {} {}", heart(rating), rating)?;
        }

        match self.detail {
            None => {}
            Some(DetailBlock::OccupationalHealthcare {
                employer_name,
                sick_leave,
            }) => {
                writeln!(f, "  employer: {employer_name}")?;
                if let Some(leave) = sick_leave {
                    writeln!(
                        f,
                        "  sick leave: {} to {}",
                        leave.start_date, leave.end_date
                    )?;
                }
            }
            Some(DetailBlock::Hospital { discharge }) => {
                writeln!(f, "  discharged {}: {}", discharge.date, discharge.criteria)?;
            }
        }

        write!(f, "  diagnose by {}", self.specialist)?;

        for line in &self.diagnoses {
            write!(f, "\n    {} {}", line.code, line.resolution)?;
        }
        Ok(())
    }
}

/// A patient's detail page content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientView<'a> {
    pub patient: &'a Patient,
    pub entries: Vec<EntryView<'a>>,
}

/// Render demographics and every entry, in the order the server returned them.
pub fn render_patient<'a>(patient: &'a Patient, lookup: &'a DiagnosisLookup) -> PatientView<'a> {
    PatientView {
        patient,
        entries: patient
            .entries
            .iter()
            .map(|entry| render_entry(entry, lookup))
            .collect(),
    }
}

impl fmt::Display for PatientView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.patient;
        writeln!(f, "{} {}", p.name, p.gender.symbol())?;
        writeln!(f, "ssn: {}", p.ssn)?;
        writeln!(f, "occupation: {}", p.occupation)?;
        if let Some(dob) = &p.date_of_birth {
            writeln!(f, "date of birth: {dob}")?;
        }
        writeln!(f)?;
        write!(f, "entries")?;
        if self.entries.is_empty() {
            write!(f, "\n  (none)")?;
        }
        for entry in &self.entries {
            write!(f, "\n\n{entry}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build_entry, EntryFormValues};
    use crate::diagnosis::Diagnosis;
    use crate::entry::{EntryKind, HospitalDetails, OccupationalHealthcareDetails};
    use crate::patient::Gender;

    fn lookup() -> DiagnosisLookup {
        DiagnosisLookup::loaded(vec![Diagnosis {
            code: "M24.2".into(),
            name: "Disorder of ligament".into(),
            latin: None,
        }])
    }

    fn values() -> EntryFormValues {
        EntryFormValues {
            description: "Back pain".into(),
            date: "2024-01-10".into(),
            specialist: "Dr. A".into(),
            diagnosis_codes: vec!["M24.2".into(), "Z57.1".into()],
            health_check_rating: "3".into(),
            employer_name: "Acme".into(),
            sick_leave_start: "2024-01-10".into(),
            sick_leave_end: "2024-01-12".into(),
            discharge_date: "2024-01-15".into(),
            discharge_criteria: "pain free".into(),
        }
    }

    fn persisted(kind: EntryKind) -> Entry {
        build_entry(kind, &values())
            .expect("draft should build")
            .into_entry("entry-1")
    }

    #[test]
    fn test_health_check_has_icon_and_no_detail_block() {
        let entry = persisted(EntryKind::HealthCheck);
        let lookup = lookup();
        let view = render_entry(&entry, &lookup);

        assert_eq!(view.icon, KindIcon::HealthCheck(HealthCheckRating::CriticalRisk));
        assert_eq!(view.detail, None);
        assert_eq!(view.id, "entry-1");
    }

    #[test]
    fn test_round_trip_reproduces_kind_fields() {
        let lookup = lookup();

        let entry = persisted(EntryKind::OccupationalHealthcare);
        let view = render_entry(&entry, &lookup);
        let EntryDetails::OccupationalHealthcare(OccupationalHealthcareDetails {
            employer_name,
            sick_leave,
        }) = entry.details()
        else {
            panic!("built an occupational entry");
        };
        assert_eq!(
            view.detail,
            Some(DetailBlock::OccupationalHealthcare {
                employer_name: employer_name.as_str(),
                sick_leave: sick_leave.as_ref(),
            })
        );
        assert_eq!(employer_name, "Acme");

        let entry = persisted(EntryKind::Hospital);
        let view = render_entry(&entry, &lookup);
        let EntryDetails::Hospital(HospitalDetails { discharge }) = entry.details() else {
            panic!("built a hospital entry");
        };
        assert_eq!(view.detail, Some(DetailBlock::Hospital { discharge }));
        assert_eq!(discharge.criteria, "pain free");
    }

    #[test]
    fn test_diagnosis_lines_distinguish_unknown_from_loading() {
        let entry = persisted(EntryKind::Hospital);

        let loaded = lookup();
        let view = render_entry(&entry, &loaded);
        let texts: Vec<String> = view
            .diagnoses
            .iter()
            .map(|line| format!("{} {}", line.code, line.resolution))
            .collect();
        assert_eq!(texts, ["M24.2 Disorder of ligament", "Z57.1 Unknown"]);

        let loading = DiagnosisLookup::Loading;
        let view = render_entry(&entry, &loading);
        assert!(view
            .diagnoses
            .iter()
            .all(|line| line.resolution == Resolution::Loading));
    }

    #[test]
    fn test_display_of_occupational_entry() {
        let entry = persisted(EntryKind::OccupationalHealthcare);
        let lookup = lookup();
        let text = render_entry(&entry, &lookup).to_string();

        let expected = concat!(
            "2024-01-10 💼\n",
            "  Back pain\n",
            "  employer: Acme\n",
            "  sick leave: 2024-01-10 to 2024-01-12\n",
            "  diagnose by Dr. A\n",
            "    M24.2 Disorder of ligament\n",
            "    Z57.1 Unknown"
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_patient_view_lists_entries_in_order() {
        let patient = Patient {
            id: "p1".into(),
            name: "Dana Scully".into(),
            ssn: "050174-432N".into(),
            occupation: "Forensic Pathologist".into(),
            gender: Gender::Female,
            date_of_birth: None,
            entries: vec![
                persisted(EntryKind::Hospital),
                persisted(EntryKind::HealthCheck),
            ],
        };
        let lookup = DiagnosisLookup::Loading;
        let view = render_patient(&patient, &lookup);

        assert_eq!(view.entries.len(), 2);
        assert_eq!(view.entries[0].icon, KindIcon::Hospital);
        let text = view.to_string();
        assert!(text.starts_with("Dana Scully ♀\nssn: 050174-432N\n"));
        assert!(text.contains("M24.2 Loading..."));
    }

    #[test]
    fn test_patient_without_entries_says_none() {
        let patient = Patient {
            id: "p2".into(),
            name: "Matti Luukkainen".into(),
            ssn: "090471-8890".into(),
            occupation: "Digital evangelist".into(),
            gender: Gender::Male,
            date_of_birth: Some("1971-04-09".into()),
            entries: vec![],
        };
        let lookup = lookup();
        let text = render_patient(&patient, &lookup).to_string();
        assert!(text.contains("date of birth: 1971-04-09"));
        assert!(text.ends_with("entries\n  (none)"));
    }
}
