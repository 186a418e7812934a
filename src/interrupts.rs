//! # Interrupt Sequencer
//!
//! Reset, NMI and IRQ are only examined at instruction boundaries, at the
//! start of `CPU::step()`. Priority is Reset > NMI > IRQ:
//!
//! - **Reset** reinitializes the registers and reloads PC from `$FFFC/$FFFD`.
//!   Nothing is pushed and no cycles are charged.
//! - **NMI** is edge-triggered: `raise_nmi()` sets a latch that is cleared
//!   when the interrupt is serviced.
//! - **IRQ** is level-triggered: it stays asserted until the driver lowers it
//!   with `raise_irq(false)` (or the bus stops reporting `irq_active()`), and is
//!   ignored while the I flag is set.
//!
//! Servicing NMI or IRQ pushes PC (high, then low) and the status byte with
//! B clear, sets I, loads PC from the vector and costs 7 cycles. BRK runs the
//! same sequence through the IRQ vector with B set in the pushed byte.

use log::debug;

use crate::{MemoryBus, Status, CPU};

/// NMI vector (`$FFFA/$FFFB`).
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Reset vector (`$FFFC/$FFFD`).
pub const RESET_VECTOR: u16 = 0xFFFC;

/// IRQ/BRK vector (`$FFFE/$FFFF`).
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Cycles spent entering an NMI or IRQ handler.
pub const INTERRUPT_CYCLES: u32 = 7;

/// What the most recent `step()` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterruptState {
    /// Fetched and executed an instruction.
    #[default]
    Running,
    /// Serviced a latched reset request.
    ServicingReset,
    /// Entered the NMI handler.
    ServicingNmi,
    /// Entered the IRQ handler.
    ServicingIrq,
}

/// An interrupt chosen for service at an instruction boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Interrupt {
    Reset,
    Nmi,
    Irq,
}

/// Interrupt request latches, written by peripherals between steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct InterruptLines {
    pub reset: bool,
    pub nmi: bool,
    pub irq: bool,
}

impl InterruptLines {
    /// Picks the interrupt to service, if any.
    ///
    /// `irq_line` is the combined IRQ level (latch or bus device).
    pub fn poll(&self, irq_line: bool, interrupt_disable: bool) -> Option<Interrupt> {
        if self.reset {
            Some(Interrupt::Reset)
        } else if self.nmi {
            Some(Interrupt::Nmi)
        } else if irq_line && !interrupt_disable {
            Some(Interrupt::Irq)
        } else {
            None
        }
    }
}

impl<M: MemoryBus> CPU<M> {
    /// Latches a non-maskable interrupt for the next instruction boundary.
    pub fn raise_nmi(&mut self) {
        self.lines.nmi = true;
    }

    /// Drives the IRQ line high (`true`) or releases it (`false`).
    pub fn raise_irq(&mut self, level: bool) {
        self.lines.irq = level;
    }

    /// Latches a reset, serviced at the next boundary ahead of NMI and IRQ.
    pub fn request_reset(&mut self) {
        self.lines.reset = true;
    }

    /// Returns true if an NMI is latched and not yet serviced.
    pub fn nmi_pending(&self) -> bool {
        self.lines.nmi
    }

    /// Returns true if the IRQ line is asserted by the latch or the bus.
    pub fn irq_pending(&self) -> bool {
        self.lines.irq || self.memory.irq_active()
    }

    /// Returns what the last `step()` did.
    pub fn interrupt_state(&self) -> InterruptState {
        self.state
    }

    /// Services a pending interrupt at an instruction boundary.
    ///
    /// Returns `None` when nothing needs service, otherwise the cycles spent.
    pub(crate) fn poll_interrupts(&mut self) -> Option<u32> {
        let interrupt_disable = self.status.contains(Status::INTERRUPT_DISABLE);
        let interrupt = self.lines.poll(self.irq_pending(), interrupt_disable)?;

        let cycles = match interrupt {
            Interrupt::Reset => {
                self.reset();
                self.state = InterruptState::ServicingReset;
                0
            }
            Interrupt::Nmi => {
                self.lines.nmi = false;
                self.enter_handler(NMI_VECTOR, false);
                self.state = InterruptState::ServicingNmi;
                INTERRUPT_CYCLES
            }
            Interrupt::Irq => {
                self.enter_handler(IRQ_VECTOR, false);
                self.state = InterruptState::ServicingIrq;
                INTERRUPT_CYCLES
            }
        };

        Some(cycles)
    }

    /// Pushes PC and status, sets I and jumps through `vector`.
    ///
    /// `brk` selects the B bit of the pushed status byte.
    pub(crate) fn enter_handler(&mut self, vector: u16, brk: bool) {
        let return_address = self.pc;
        self.push_word(return_address);
        self.push(self.status.pushed(brk));
        self.status.insert(Status::INTERRUPT_DISABLE);
        self.pc = self.read_word(vector);

        debug!(
            "interrupt via ${:04X}: return ${:04X}, handler ${:04X}, brk={}",
            vector, return_address, self.pc, brk
        );
    }
}
