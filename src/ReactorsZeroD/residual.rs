//! Residual of the governing equations in the form `lhs · dy/dt = rhs`.
use super::errors::ReactorError;
use super::reactor::IdealGasConstPressureMoleReactor;

impl IdealGasConstPressureMoleReactor {
    /// Fills `lhs` and `rhs` (both of length `neq()`) at `time` for the state applied by
    /// the last `update_state`.
    pub fn eval(&mut self, time: f64, lhs: &mut [f64], rhs: &mut [f64]) -> Result<(), ReactorError> {
        let layout = self.layout.clone().ok_or(ReactorError::NotInitialized("eval"))?;
        let nv = layout.nv();
        if lhs.len() != nv || rhs.len() != nv {
            return Err(ReactorError::Configuration(format!(
                "residual buffers have lengths {} and {}, expected {}",
                lhs.len(),
                rhs.len(),
                nv
            )));
        }
        let thermo = self
            .thermo
            .as_deref_mut()
            .ok_or_else(|| ReactorError::Configuration("reactor is empty".to_string()))?;
        let sidx = layout.sidx();
        let nsp = layout.n_species();
        lhs.iter_mut().for_each(|l| *l = 1.0);
        rhs.iter_mut().for_each(|r| *r = 0.0);

        // walls see the temperature of the applied state
        self.qdot = 0.0;
        for (wall, side) in self.walls.iter_mut() {
            wall.update(time, *side, self.temperature);
            self.qdot += side.sign() * wall.heat_rate();
        }
        for device in self.inlets.iter_mut().chain(self.outlets.iter_mut()) {
            device.update(time);
        }

        thermo.restore_state(&self.state);
        thermo.partial_molar_enthalpies(&mut self.hk);
        let imw = thermo.inverse_molecular_weights();

        match self.kinetics.as_deref_mut() {
            Some(kin) if self.chemistry => kin.net_production_rates(thermo, &mut self.wdot),
            _ => self.wdot.iter_mut().for_each(|w| *w = 0.0),
        }

        self.sdot.iter_mut().for_each(|s| *s = 0.0);
        for (i, surface) in self.surfaces.iter_mut().enumerate() {
            let range = layout.surface_range(i);
            surface.update(time);
            surface.eval(
                thermo,
                &mut lhs[range.clone()],
                &mut rhs[range],
                &mut self.sdot,
            );
        }

        let mut mcp_dtdt = self.qdot;
        let dndt = &mut rhs[sidx..sidx + nsp];
        for k in 0..nsp {
            mcp_dtdt -= (self.wdot[k] * self.volume + self.sdot[k]) * self.hk[k];
            dndt[k] = self.wdot[k] * self.volume + self.sdot[k];
        }
        for outlet in &self.outlets {
            for k in 0..nsp {
                dndt[k] -= outlet.outlet_species_mass_flow_rate(k) * imw[k];
            }
        }
        for inlet in &self.inlets {
            mcp_dtdt += inlet.enthalpy_mass() * inlet.mass_flow_rate();
            for k in 0..nsp {
                let mdot_k = inlet.outlet_species_mass_flow_rate(k);
                dndt[k] += mdot_k * imw[k];
                mcp_dtdt -= self.hk[k] * imw[k] * mdot_k;
            }
        }

        if self.energy {
            rhs[0] = mcp_dtdt;
            lhs[0] = self.mass * thermo.cp_mass();
        } else {
            rhs[0] = 0.0;
            lhs[0] = 1.0;
        }
        Ok(())
    }

    /// external heat rate through walls at the last evaluation, W
    pub fn heat_rate(&self) -> f64 {
        self.qdot
    }

    /// net production rates of the bulk species at the last evaluation, kmol/(m³·s)
    pub fn net_production_rates(&self) -> &[f64] {
        &self.wdot
    }
}
