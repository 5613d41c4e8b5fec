//! Register definitions for the QMC5883L
//!
//! The QMC5883L has a flat register map: six output data bytes at
//! 0x00-0x05, a status register, two control registers and the set/reset
//! period register. The measurement output block is read in one bus
//! transaction (see `Qmc5883lDriver::read_raw`) rather than through the
//! per-byte registers below.

device_driver::create_device!(
    device_name: Qmc5883l,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = BE;
        }

        /// X-axis output, low byte (0x00)
        register OutXL {
            const ADDRESS = 0x00;
            const SIZE_BITS = 8;

            out_x_l: uint = 0..8,
        },

        /// X-axis output, high byte (0x01)
        register OutXH {
            const ADDRESS = 0x01;
            const SIZE_BITS = 8;

            out_x_h: uint = 0..8,
        },

        /// Y-axis output, low byte (0x02)
        register OutYL {
            const ADDRESS = 0x02;
            const SIZE_BITS = 8;

            out_y_l: uint = 0..8,
        },

        /// Y-axis output, high byte (0x03)
        register OutYH {
            const ADDRESS = 0x03;
            const SIZE_BITS = 8;

            out_y_h: uint = 0..8,
        },

        /// Z-axis output, low byte (0x04)
        register OutZL {
            const ADDRESS = 0x04;
            const SIZE_BITS = 8;

            out_z_l: uint = 0..8,
        },

        /// Z-axis output, high byte (0x05)
        register OutZH {
            const ADDRESS = 0x05;
            const SIZE_BITS = 8;

            out_z_h: uint = 0..8,
        },

        /// STATUS - Status Register (0x06)
        register Status {
            const ADDRESS = 0x06;
            const SIZE_BITS = 8;

            /// Data ready (set when a new measurement is available)
            drdy: bool = 0,
            /// Overflow (any axis exceeded the measurement range)
            ovl: bool = 1,
            /// Data skipped (output registers overwritten before read-out)
            dor: bool = 2,
            reserved_7_3: uint = 3..8,
        },

        /// CONTROL 1 - Mode / ODR / Range / OSR (0x09)
        ///
        /// The four fields are packed into one byte and must never overlap.
        register Control1 {
            const ADDRESS = 0x09;
            const SIZE_BITS = 8;

            /// Operating mode (0 = standby, 1 = continuous)
            mode: uint = 0..2,
            /// Output data rate (0 = 10Hz, 1 = 50Hz, 2 = 100Hz, 3 = 200Hz)
            odr: uint = 2..4,
            /// Full-scale range (0 = 2 Gauss, 1 = 8 Gauss)
            rng: uint = 4..6,
            /// Over-sample ratio (0 = 512, 1 = 256, 2 = 128, 3 = 64)
            osr: uint = 6..8,
        },

        /// CONTROL 2 - Reset / roll-over / interrupt (0x0A)
        register Control2 {
            const ADDRESS = 0x0A;
            const SIZE_BITS = 8;

            /// Interrupt pin enable
            int_enb: bool = 0,
            reserved_5_1: uint = 1..6,
            /// Register pointer roll-over between 0x00 and 0x06
            rol_pnt: bool = 6,
            /// Soft reset (restores the default register state)
            soft_rst: bool = 7,
        },

        /// SET/RESET PERIOD - recommended value 0x01 (0x0B)
        register SetResetPeriod {
            const ADDRESS = 0x0B;
            const SIZE_BITS = 8;

            period: uint = 0..8,
        },
    }
);
