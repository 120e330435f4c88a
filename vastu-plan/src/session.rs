//! Planning session: one map, cached derived state.
//!
//! The configuration space is cached per robot geometry and the potential
//! field per (geometry, goal, field configuration). Changing the goal or the
//! geometry selects a different cache entry; cached values are never mutated,
//! so planning always reads a field that matches its inputs.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use log::debug;
use rand::Rng;

use crate::core::{PlanOutcome, Pose};
use crate::error::Result;
use crate::field::{FieldConfig, PotentialField};
use crate::grid::{ConfigurationSpace, MapDefinition, RobotGeometry};
use crate::planner::{DescentConfig, GradientDescentPlanner};

type FieldKey = (RobotGeometry, Pose, [u64; 3]);

/// Owns a map and the values derived from it.
#[derive(Debug)]
pub struct PlanningSession {
    map: MapDefinition,
    spaces: HashMap<RobotGeometry, ConfigurationSpace>,
    fields: HashMap<FieldKey, PotentialField>,
}

impl PlanningSession {
    /// Start a session over `map`.
    pub fn new(map: MapDefinition) -> Self {
        Self {
            map,
            spaces: HashMap::new(),
            fields: HashMap::new(),
        }
    }

    /// The session's map.
    pub fn map(&self) -> &MapDefinition {
        &self.map
    }

    /// Configuration space for `geometry`, computed on first use.
    pub fn configuration_space(&mut self, geometry: RobotGeometry) -> Result<&ConfigurationSpace> {
        match self.spaces.entry(geometry) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let space = ConfigurationSpace::inflate(&self.map.grid, geometry)?;
                Ok(entry.insert(space))
            }
        }
    }

    /// Potential field for `goal` under `geometry`, computed on first use.
    pub fn field(
        &mut self,
        geometry: RobotGeometry,
        goal: Pose,
        config: &FieldConfig,
    ) -> Result<&PotentialField> {
        self.ensure_field(geometry, goal, config)?;
        let key = (geometry, goal, config.cache_key());
        Ok(&self.fields[&key])
    }

    /// Run the descent planner from the map's start to its goal.
    pub fn plan_descent<R: Rng>(
        &mut self,
        geometry: RobotGeometry,
        field_config: &FieldConfig,
        descent_config: &DescentConfig,
        rng: &mut R,
    ) -> Result<PlanOutcome> {
        let (start, goal) = (self.map.start, self.map.goal);
        self.plan_descent_between(start, goal, geometry, field_config, descent_config, rng)
    }

    /// Run the descent planner between arbitrary poses on this map.
    ///
    /// Geometry, configuration and both poses are validated before stepping.
    pub fn plan_descent_between<R: Rng>(
        &mut self,
        start: Pose,
        goal: Pose,
        geometry: RobotGeometry,
        field_config: &FieldConfig,
        descent_config: &DescentConfig,
        rng: &mut R,
    ) -> Result<PlanOutcome> {
        let planner = GradientDescentPlanner::new(descent_config.clone())?;
        self.configuration_space(geometry)?.check_pose(start, "start")?;
        self.ensure_field(geometry, goal, field_config)?;

        let space = &self.spaces[&geometry];
        let field = &self.fields[&(geometry, goal, field_config.cache_key())];
        planner.plan(space, field, start, rng)
    }

    /// Number of cached (configuration spaces, fields).
    pub fn cache_sizes(&self) -> (usize, usize) {
        (self.spaces.len(), self.fields.len())
    }

    fn ensure_field(&mut self, geometry: RobotGeometry, goal: Pose, config: &FieldConfig) -> Result<()> {
        let key = (geometry, goal, config.cache_key());
        if self.fields.contains_key(&key) {
            return Ok(());
        }

        let field = PotentialField::compute(self.configuration_space(geometry)?, goal, config)?;
        debug!(
            "[Session] Cached field for '{}' goal {} robot {}",
            self.map.id, goal, geometry
        );
        self.fields.insert(key, field);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanError;
    use crate::io::parse_map;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session() -> PlanningSession {
        let map = parse_map(
            "open",
            "2 0 0 0 0 0\n0 0 0 0 0 0\n0 0 0 0 0 0\n0 0 0 0 0 3\n",
        )
        .unwrap();
        PlanningSession::new(map)
    }

    #[test]
    fn test_caches_per_geometry_and_goal() {
        let mut session = session();
        let config = FieldConfig::default();

        session.field(RobotGeometry::point(), Pose::new(3, 5), &config).unwrap();
        session.field(RobotGeometry::point(), Pose::new(3, 5), &config).unwrap();
        assert_eq!(session.cache_sizes(), (1, 1));

        session.field(RobotGeometry::point(), Pose::new(0, 5), &config).unwrap();
        assert_eq!(session.cache_sizes(), (1, 2));

        session.field(RobotGeometry::new(2, 2), Pose::new(1, 1), &config).unwrap();
        assert_eq!(session.cache_sizes(), (2, 3));
    }

    #[test]
    fn test_plan_descent_from_map_markers() {
        let mut session = session();
        let mut rng = StdRng::seed_from_u64(3);
        let outcome = session
            .plan_descent(
                RobotGeometry::point(),
                &FieldConfig::default(),
                &DescentConfig::default(),
                &mut rng,
            )
            .unwrap();
        assert!(outcome.is_success());
        assert_eq!(outcome.path.first(), Some(&Pose::new(0, 0)));
        assert_eq!(outcome.end(), Some(Pose::new(3, 5)));
        assert_eq!(outcome.recovery_engagements, 0);
    }

    #[test]
    fn test_goal_blocked_by_inflation() {
        let mut session = session();
        // Bottom-right corner cannot host a 2x2 robot anchored at its top-left
        let result = session.plan_descent(
            RobotGeometry::new(2, 2),
            &FieldConfig::default(),
            &DescentConfig::default(),
            &mut StdRng::seed_from_u64(0),
        );
        assert!(matches!(result, Err(PlanError::InvalidGeometry(_))));
    }
}
