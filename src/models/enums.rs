use crate::db::DatabaseError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Serde goes through the same canonical string so the wire format,
/// the stored form, and `as_str` never disagree.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

str_enum!(Gender {
    Male => "male",
    Female => "female",
    Other => "other",
    PreferNotToSay => "prefer_not_to_say",
});

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
            Self::PreferNotToSay => "Prefer not to say",
        }
    }
}

str_enum!(BloodGroup {
    APositive => "A+",
    ANegative => "A-",
    BPositive => "B+",
    BNegative => "B-",
    AbPositive => "AB+",
    AbNegative => "AB-",
    OPositive => "O+",
    ONegative => "O-",
});

/// Fixed symptom catalog presented on the assessment form.
str_enum!(Symptom {
    ChestPain => "chest_pain",
    ShortnessOfBreath => "shortness_of_breath",
    Palpitations => "palpitations",
    Syncope => "syncope",
    Fatigue => "fatigue",
    Dizziness => "dizziness",
    LegSwelling => "leg_swelling",
    Nausea => "nausea",
});

impl Symptom {
    pub fn label(&self) -> &'static str {
        match self {
            Self::ChestPain => "Chest Pain",
            Self::ShortnessOfBreath => "Shortness of Breath",
            Self::Palpitations => "Palpitations",
            Self::Syncope => "Syncope (Fainting)",
            Self::Fatigue => "Fatigue",
            Self::Dizziness => "Dizziness",
            Self::LegSwelling => "Swelling in Legs",
            Self::Nausea => "Nausea",
        }
    }
}

/// Fixed risk-factor catalog presented on the assessment form.
str_enum!(RiskFactor {
    Diabetes => "diabetes",
    Hypertension => "hypertension",
    FamilyHistoryHeartDisease => "family_history_heart_disease",
    Smoking => "smoking",
    HighCholesterol => "high_cholesterol",
    Obesity => "obesity",
    Stress => "stress",
    SedentaryLifestyle => "sedentary_lifestyle",
});

impl RiskFactor {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes",
            Self::Hypertension => "Hypertension",
            Self::FamilyHistoryHeartDisease => "Family History of Heart Disease",
            Self::Smoking => "Smoking",
            Self::HighCholesterol => "High Cholesterol",
            Self::Obesity => "Obesity",
            Self::Stress => "Stress",
            Self::SedentaryLifestyle => "Sedentary Lifestyle",
        }
    }
}
