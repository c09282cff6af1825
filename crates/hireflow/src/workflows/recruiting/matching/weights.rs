/// Integer percentage weights for the composite match score.
///
/// Skills dominate, experience is secondary, location and salary break ties.
pub const DEFAULT_WEIGHTS: MatchWeights = MatchWeights {
    skills: 50,
    experience: 30,
    location: 10,
    salary: 10,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchWeights {
    pub skills: u32,
    pub experience: u32,
    pub location: u32,
    pub salary: u32,
}

impl MatchWeights {
    pub const fn sum(&self) -> u32 {
        self.skills + self.experience + self.location + self.salary
    }

    /// Weighted average of four 0-100 sub-scores, rounded half-up.
    pub(crate) fn combine(&self, skills: u8, experience: u8, location: u8, salary: u8) -> u8 {
        let total = self.sum();
        if total == 0 {
            return 0;
        }

        let weighted = self.skills * u32::from(skills)
            + self.experience * u32::from(experience)
            + self.location * u32::from(location)
            + self.salary * u32::from(salary);

        ((weighted * 2 + total) / (total * 2)).min(100) as u8
    }
}
