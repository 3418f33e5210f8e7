//! Component property lookups.
//!
//! The production property backend derives lumped component properties
//! as functions of the gas/oil-mass ratio ("gorm"), because heavy
//! fractions are lumped differently depending on how gas-rich the
//! mixture is. That backend is injected through the [`PropertyTable`]
//! trait; the [`LumpedPropertyTable`] shipped here carries constant
//! reference values and serves as the default and as a test stand-in.

use crate::component::Component;
use crate::components::Components;
use bf_core::numeric::Real;

/// Source of per-component reference properties.
///
/// `gorm` is the lumping parameter; implementations are free to ignore
/// it (the default table does) or to interpolate lumped properties
/// from it.
pub trait PropertyTable: Send + Sync {
    /// Molar mass [kg/kmol] of the (lumped) component.
    fn molar_mass(&self, component: Component, gorm: Real) -> Real;

    /// Critical temperature [K] of the (lumped) component.
    fn critical_temperature(&self, component: Component, gorm: Real) -> Real;

    /// Critical volume [m³/kmol] of the (lumped) component.
    fn critical_volume(&self, component: Component, gorm: Real) -> Real;
}

/// Constant reference property table.
///
/// Molar masses are the model's default component masses; critical
/// properties are reference values for the base fractions, with the
/// sulphur-bearing tail species resolved through
/// [`Component::lumped_base`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LumpedPropertyTable;

impl LumpedPropertyTable {
    /// Default molar masses [kg/kmol] as a component vector.
    pub fn default_molar_masses() -> Components {
        let mut out = Components::ZERO;
        for component in Component::ALL {
            out[component] = Self::reference_molar_mass(component);
        }
        out
    }

    fn reference_molar_mass(component: Component) -> Real {
        match component {
            Component::Asphaltene => 7.979050e+02,
            Component::Resin => 6.105592e+02,
            Component::C15PlusAro => 4.633910e+02,
            Component::C15PlusSat => 2.646560e+02,
            Component::C6Minus14Aro => 1.564148e+02,
            Component::C6Minus14Sat => 1.025200e+02,
            Component::C5 => 7.215064e+01,
            Component::C4 => 5.812370e+01,
            Component::C3 => 4.409676e+01,
            Component::C2 => 3.006982e+01,
            Component::C1 => 1.604288e+01,
            Component::Cox => 4.400980e+01,
            Component::N2 => 2.801352e+01,
            Component::H2S => 3.408000e+01,
            Component::LsC => 2.646560e+02,
            Component::C15PlusAT => 2.646560e+02,
            Component::C6Minus14BT => 1.564147e+02,
            Component::C6Minus14DBT => 1.564147e+02,
            Component::C6Minus14BP => 1.564147e+02,
            Component::C15PlusAroS => 2.646560e+02,
            Component::C15PlusSatS => 2.646560e+02,
            Component::C6Minus14SatS => 1.564147e+02,
            Component::C6Minus14AroS => 1.564147e+02,
        }
    }

    fn reference_critical_temperature(component: Component) -> Real {
        match component.lumped_base() {
            Component::Asphaltene => 1.1000e+03,
            Component::Resin => 9.5000e+02,
            Component::C15PlusAro => 8.2000e+02,
            Component::C15PlusSat => 7.5000e+02,
            Component::C6Minus14Aro => 6.5000e+02,
            Component::C6Minus14Sat => 5.8000e+02,
            Component::C5 => 4.6970e+02,
            Component::C4 => 4.2512e+02,
            Component::C3 => 3.6983e+02,
            Component::C2 => 3.0532e+02,
            Component::C1 => 1.9056e+02,
            Component::Cox => 3.0413e+02,
            Component::N2 => 1.2620e+02,
            Component::H2S => 3.7340e+02,
            // lumped_base never yields a tail species
            _ => Real::NAN,
        }
    }

    fn reference_critical_volume(component: Component) -> Real {
        match component.lumped_base() {
            Component::Asphaltene => 2.3000e+00,
            Component::Resin => 1.6000e+00,
            Component::C15PlusAro => 9.0000e-01,
            Component::C15PlusSat => 9.5000e-01,
            Component::C6Minus14Aro => 4.1000e-01,
            Component::C6Minus14Sat => 4.3000e-01,
            Component::C5 => 3.1300e-01,
            Component::C4 => 2.5500e-01,
            Component::C3 => 2.0000e-01,
            Component::C2 => 1.4550e-01,
            Component::C1 => 9.8600e-02,
            Component::Cox => 9.4000e-02,
            Component::N2 => 9.0100e-02,
            Component::H2S => 9.8500e-02,
            _ => Real::NAN,
        }
    }
}

impl PropertyTable for LumpedPropertyTable {
    fn molar_mass(&self, component: Component, _gorm: Real) -> Real {
        Self::reference_molar_mass(component)
    }

    fn critical_temperature(&self, component: Component, _gorm: Real) -> Real {
        Self::reference_critical_temperature(component)
    }

    fn critical_volume(&self, component: Component, _gorm: Real) -> Real {
        Self::reference_critical_volume(component)
    }
}
