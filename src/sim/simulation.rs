use super::{FileIo, SimInput, StepOutput};
use crate::base::{par_map, par_map_index, Analysis, ParamSoil};
use crate::hydro::{ColumnHydraulics, HydraulicState};
use crate::stability::{aggregate_groups, InfiniteSlope, Janbu3D, SlipSurfaceGroup, SlipSurfaceGrouper};
use crate::stability::{SoilColumn, SourceFlags, StabilityResult};
use crate::StrError;

/// Runs the coupled infiltration and slope-stability simulation
///
/// Each time step performs a data-parallel infiltration pass over all cells followed by a
/// data-parallel stability pass over all cells (infinite slope) or all groups (Janbu 3D).
/// The stability pass only starts after the whole infiltration pass has completed.
pub struct Simulation<'a> {
    /// Holds the input data
    input: &'a SimInput,

    /// Holds the constant hydraulic data of each cell
    hydraulics: Vec<ColumnHydraulics>,

    /// Holds the material parameters of each cell
    soils: Vec<ParamSoil>,

    /// Holds the slip-surface groups (Janbu 3D only)
    groups: Vec<SlipSurfaceGroup>,
}

impl<'a> Simulation<'a> {
    /// Allocates a new instance
    pub fn new(input: &'a SimInput) -> Result<Self, StrError> {
        input.validate()?;
        let config = &input.config;
        let terrain = &input.terrain;
        let ncol = terrain.ncol();
        let mut hydraulics = Vec::with_capacity(terrain.ncell());
        let mut soils = Vec::with_capacity(terrain.ncell());
        for id in 0..terrain.ncell() {
            let (i, j) = terrain.ij(id);
            let soil = config.param_soil(input.materials[id])?;
            soils.push(*soil);
            hydraulics.push(ColumnHydraulics::new(
                terrain.top(id),
                terrain.bottom(id),
                terrain.dip_rad(id),
                soil,
                input.initial_suction.get(i, j),
                config.unit_weight_water,
                config.max_surface_storage,
            )?);
        }
        let groups = match (config.analysis, &config.grouping) {
            (Analysis::Janbu3D, Some(param)) => {
                let grouper = SlipSurfaceGrouper::new(param)?;
                grouper.generate(terrain.nrow(), ncol)
            }
            (Analysis::Janbu3D, None) => return Err("the Janbu 3D analysis requires grouping parameters"),
            (Analysis::InfiniteSlope, _) => Vec::new(),
        };
        log::info!(
            "simulation with {} cells ({} × {}), {} groups, {} time steps",
            terrain.ncell(),
            terrain.nrow(),
            ncol,
            groups.len(),
            input.rainfall.n_interval()
        );
        Ok(Simulation {
            input,
            hydraulics,
            soils,
            groups,
        })
    }

    /// Returns the slip-surface groups
    pub fn groups(&self) -> &[SlipSurfaceGroup] {
        &self.groups
    }

    /// Returns the initial output (step 0)
    pub fn initialize(&self) -> StepOutput {
        let input = self.input;
        let precision = &input.config.precision;
        let states = par_map_index(self.hydraulics.len(), |id| {
            let (i, j) = input.terrain.ij(id);
            let rain = input.rainfall.intensity(0, id);
            self.hydraulics[id].initialize(input.initial_groundwater.get(i, j), rain, precision)
        });
        self.analyze(0, 0.0, states)
    }

    /// Advances all cells by one time step and analyzes the stability of the new state
    ///
    /// The rainfall of interval `previous.step` is applied during the step.
    pub fn advance(&self, previous: &StepOutput) -> Result<StepOutput, StrError> {
        let input = self.input;
        let config = &input.config;
        let interval = previous.step;
        if interval >= input.rainfall.n_interval() {
            return Err("there is no rainfall data for this time step");
        }
        if previous.states.len() != self.hydraulics.len() {
            return Err("the number of states must equal the number of cells");
        }
        let dt = input.rainfall.dt;
        let states = par_map_index(self.hydraulics.len(), |id| {
            let rain = input.rainfall.intensity(interval, id);
            self.hydraulics[id].step(
                &previous.states[id],
                rain,
                dt,
                &config.infiltration_solver,
                &config.precision,
            )
        });
        let t = config.precision.time(((interval + 1) as f64) * dt);
        Ok(self.analyze(interval + 1, t, states))
    }

    /// Runs all time steps starting from the initial state
    ///
    /// Returns the output of the last time step.
    pub fn run(&self, file_io: &mut FileIo) -> Result<StepOutput, StrError> {
        let initial = self.initialize();
        file_io.write_output(&initial)?;
        self.run_from(initial, file_io)
    }

    /// Runs the remaining time steps starting from a stored output (restart)
    ///
    /// **Note:** The stored output is not written again.
    pub fn run_from(&self, start: StepOutput, file_io: &mut FileIo) -> Result<StepOutput, StrError> {
        let mut current = start;
        while current.step < self.input.rainfall.n_interval() {
            current = self.advance(&current)?;
            file_io.write_output(&current)?;
            log::info!(
                "step {:>6}  t = {:>12}  FS_min = {:>8}  landslides = {:>6}  debris flows = {:>6}",
                current.step,
                current.t,
                current.fs_min(),
                current.n_landslide(),
                current.n_debris_flow()
            );
        }
        file_io.write_self()?;
        Ok(current)
    }

    /// Runs the stability analysis and classification of a hydraulic state
    fn analyze(&self, step: usize, t: f64, states: Vec<HydraulicState>) -> StepOutput {
        let input = self.input;
        let config = &input.config;
        let terrain = &input.terrain;
        let columns: Vec<SoilColumn> = par_map_index(self.hydraulics.len(), |id| {
            let (i, j) = terrain.ij(id);
            SoilColumn {
                hydraulics: self.hydraulics[id],
                state: states[id],
                soil: self.soils[id],
                aspect: terrain.aspect(id),
                center: ((j as f64 + 0.5) * terrain.dx, -(i as f64 + 0.5) * terrain.dy),
            }
        });
        let stability: Vec<StabilityResult> = match config.analysis {
            Analysis::InfiniteSlope => {
                let analyzer = InfiniteSlope::new(config);
                par_map(&columns, |column| analyzer.analyze(column))
            }
            Analysis::Janbu3D => {
                let analyzer = Janbu3D::new(config, terrain.dx, terrain.dy);
                let results = par_map(&self.groups, |group| analyzer.analyze(group, &columns));
                aggregate_groups(columns.len(), &self.groups, &results)
            }
        };
        let sources = stability
            .iter()
            .enumerate()
            .map(|(id, result)| {
                let initiation = match (&input.initiation_mask, config.debris_flow_mask) {
                    (Some(mask), true) => Some(mask[id]),
                    _ => None,
                };
                SourceFlags::classify(
                    result.fs,
                    columns[id].thickness(),
                    config.fs_critical,
                    config.depth_increment,
                    initiation,
                )
            })
            .collect();
        StepOutput {
            step,
            t,
            states,
            stability,
            sources,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
