use serde::{Deserialize, Serialize};

/// One rejected field in a student payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub invalid_value: i64,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, invalid_value: i64) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            invalid_value,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

/// Learner attributes as entered in the form, before mapping to the model's
/// encoding. Missing fields take the form's initial values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StudentForm {
    pub study_hours: i64,
    pub attendance: i64,
    pub resources: i64,
    /// Hours per week
    pub extracurricular: i64,
    /// 0-10 slider
    pub motivation: i64,
    /// 0 none .. 4 excellent
    pub internet: i64,
    pub gender: Gender,
    pub age: i64,
    pub online_courses: i64,
    pub discussions: i64,
    pub assignment_completion: i64,
    pub exam_score: i64,
    /// 0-5 familiarity
    pub edu_tech: i64,
    pub stress_level: i64,
    /// 0-100 estimate
    pub final_grade: i64,
}

impl Default for StudentForm {
    fn default() -> Self {
        Self {
            study_hours: 5,
            attendance: 80,
            resources: 3,
            extracurricular: 1,
            motivation: 6,
            internet: 3,
            gender: Gender::Other,
            age: 20,
            online_courses: 1,
            discussions: 3,
            assignment_completion: 85,
            exam_score: 70,
            edu_tech: 3,
            stress_level: 4,
            final_grade: 75,
        }
    }
}

/// Attributes in the exact encoding the prediction service expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StudentPayload {
    pub study_hours: i64,
    pub attendance: i64,
    pub resources: i64,
    pub extracurricular: i64,
    pub motivation: i64,
    pub internet: i64,
    pub gender: i64,
    pub age: i64,
    pub online_courses: i64,
    pub discussions: i64,
    pub assignment_completion: i64,
    pub exam_score: i64,
    pub edu_tech: i64,
    pub stress_level: i64,
    pub final_grade: i64,
}

/// Accepted range per payload field, inclusive
const FIELD_RANGES: [(&str, i64, i64); 15] = [
    ("StudyHours", 0, 100),
    ("Attendance", 0, 100),
    ("Resources", 0, 10),
    ("Extracurricular", 0, 1),
    ("Motivation", 0, 2),
    ("Internet", 0, 1),
    ("Gender", 0, 1),
    ("Age", 10, 100),
    ("OnlineCourses", 0, 50),
    ("Discussions", 0, 10),
    ("AssignmentCompletion", 0, 100),
    ("ExamScore", 0, 100),
    ("EduTech", 0, 1),
    ("StressLevel", 0, 10),
    ("FinalGrade", 0, 10),
];

fn binary(value: i64) -> i64 {
    i64::from(value > 0)
}

// Half-up division, matching how the form rounds its sliders.
fn scaled(value: i64, divisor: i64, max: i64) -> i64 {
    let rounded = (value as f64 / divisor as f64).round() as i64;
    rounded.clamp(0, max)
}

impl StudentForm {
    pub fn to_payload(&self) -> StudentPayload {
        StudentPayload {
            study_hours: self.study_hours,
            attendance: self.attendance,
            resources: self.resources,
            extracurricular: binary(self.extracurricular),
            motivation: scaled(self.motivation, 5, 2),
            internet: binary(self.internet),
            gender: i64::from(self.gender == Gender::Female),
            age: self.age,
            online_courses: self.online_courses,
            discussions: self.discussions,
            assignment_completion: self.assignment_completion,
            exam_score: self.exam_score,
            edu_tech: binary(self.edu_tech),
            stress_level: self.stress_level,
            final_grade: scaled(self.final_grade, 10, 10),
        }
    }
}

impl StudentPayload {
    fn values(&self) -> [i64; 15] {
        [
            self.study_hours,
            self.attendance,
            self.resources,
            self.extracurricular,
            self.motivation,
            self.internet,
            self.gender,
            self.age,
            self.online_courses,
            self.discussions,
            self.assignment_completion,
            self.exam_score,
            self.edu_tech,
            self.stress_level,
            self.final_grade,
        ]
    }

    /// Every out-of-range field, in payload order
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let errors: Vec<FieldError> = FIELD_RANGES
            .iter()
            .zip(self.values())
            .filter(|((_, min, max), value)| value < min || value > max)
            .map(|((field, min, max), value)| {
                FieldError::new(*field, format!("must be between {min} and {max}"), value)
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
