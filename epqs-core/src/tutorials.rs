//! Guided tutorials listed next to the integrations.

use serde::Serialize;
use std::fmt;

/// Difficulty of a tutorial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TutorialLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl TutorialLevel {
    /// Display text for level badges.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "iniciante",
            Self::Intermediate => "intermediário",
            Self::Advanced => "avançado",
        }
    }
}

impl fmt::Display for TutorialLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tutorial {
    pub title: &'static str,
    pub description: &'static str,
    pub level: TutorialLevel,
    /// Estimated duration, e.g. `30 min`.
    pub duration: &'static str,
    /// Identifier the front end uses to launch the tutorial.
    pub action: &'static str,
}

const TUTORIALS: &[Tutorial] = &[
    Tutorial {
        title: "Primeiros Passos com Jamovi",
        description: "Guia completo para iniciantes em análise estatística com Jamovi.",
        level: TutorialLevel::Beginner,
        duration: "30 min",
        action: "showJamoviTutorial",
    },
    Tutorial {
        title: "Modelagem 3D no FreeCAD",
        description: "Aprenda a criar modelos paramétricos para simulação de processos.",
        level: TutorialLevel::Intermediate,
        duration: "60 min",
        action: "showFreeCADTutorial",
    },
    Tutorial {
        title: "Simulação de Processos com JaamSim",
        description: "Construa e execute suas primeiras simulações de eventos discretos.",
        level: TutorialLevel::Intermediate,
        duration: "45 min",
        action: "showJaamSimTutorial",
    },
    Tutorial {
        title: "Digital Twin: EPQS + FreeCAD + JaamSim + Jamovi",
        description: "Guia avançado para implementar um Digital Twin completo.",
        level: TutorialLevel::Advanced,
        duration: "120 min",
        action: "showDigitalTwinTutorial",
    },
];

/// Returns all tutorials in display order.
pub fn all_tutorials() -> &'static [Tutorial] {
    TUTORIALS
}

/// Finds a tutorial by its action identifier.
pub fn find_tutorial(action: &str) -> Option<&'static Tutorial> {
    TUTORIALS.iter().find(|t| t.action == action)
}
