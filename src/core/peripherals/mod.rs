// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Motherboard peripherals and simple slot cards
//!
//! The keyboard, speaker and game port live on the motherboard and are owned by
//! the memory dispatcher, which decodes their soft switches. The joystick card is
//! a regular slot card.

mod game_port;
pub mod joystick_card;
mod keyboard;
mod speaker;
pub mod video;

pub use game_port::{GamePort, BUTTON_COUNT, PADDLE_COUNT, PADDLE_CYCLES_PER_UNIT};
pub use joystick_card::{JoystickCard, JoystickState};
pub use keyboard::Keyboard;
pub use speaker::{AudioSink, NullAudioSink, Speaker};
pub use video::DisplayMode;
