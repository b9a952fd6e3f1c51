// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Declarative macros that generate message and service types.

/// Define a ROS message struct from its field list.
///
/// Fields are encoded in declaration order. The macro derives `Debug`,
/// `Clone`, `Default`, `PartialEq` and serde support, and implements
/// [`WireField`](crate::message::WireField),
/// [`RosMessage`](crate::message::RosMessage) and
/// [`Randomize`](crate::message::Randomize). The definition text is built
/// from the Rust field types, so it cannot drift from the codec.
///
/// Invoking crates need `serde` as a dependency.
///
/// # Example
///
/// ```
/// use roswire::message::RosMessage;
/// use roswire::msgs::std_msgs::Header;
///
/// roswire::ros_message! {
///     pub struct Reading("demo_msgs/Reading") {
///         pub header: Header,
///         pub samples: Vec<f32>,
///     }
/// }
///
/// assert!(Reading::definition().starts_with("std_msgs/Header header\nfloat32[] samples\n"));
/// ```
#[macro_export]
macro_rules! ros_message {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($type_name:literal) {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $field_ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $field_ty,
            )*
        }

        impl $crate::message::WireField for $name {
            #[allow(unused_variables)]
            fn write(&self, writer: &mut $crate::encoding::ros1::WireWriter) {
                $( <$field_ty as $crate::message::WireField>::write(&self.$field, writer); )*
            }

            #[allow(unused_variables)]
            fn read(
                cursor: &mut $crate::encoding::ros1::WireCursor<'_>,
            ) -> $crate::core::Result<Self> {
                ::std::result::Result::Ok(Self {
                    $(
                        $field: {
                            let start = cursor.position();
                            <$field_ty as $crate::message::WireField>::read(cursor).map_err(|e| {
                                e.in_field(
                                    stringify!($field),
                                    <$field_ty as $crate::message::WireField>::ros_type(),
                                    start,
                                )
                            })?
                        },
                    )*
                })
            }

            fn wire_size(&self) -> usize {
                0 $( + <$field_ty as $crate::message::WireField>::wire_size(&self.$field) )*
            }

            fn min_wire_size() -> usize {
                0 $( + <$field_ty as $crate::message::WireField>::min_wire_size() )*
            }

            fn ros_type() -> ::std::string::String {
                ::std::string::String::from($type_name)
            }

            fn collect_dependencies(deps: &mut $crate::message::DependencyList) {
                if deps.iter().any(|(name, _)| *name == $type_name) {
                    return;
                }
                deps.push((
                    $type_name,
                    <Self as $crate::message::RosMessage>::body(),
                ));
                <Self as $crate::message::RosMessage>::collect_field_dependencies(deps);
            }
        }

        impl $crate::message::RosMessage for $name {
            const TYPE_NAME: &'static str = $type_name;

            fn body() -> ::std::string::String {
                #[allow(unused_mut)]
                let mut out = ::std::string::String::new();
                $(
                    out.push_str(&<$field_ty as $crate::message::WireField>::ros_type());
                    out.push(' ');
                    out.push_str(stringify!($field));
                    out.push('\n');
                )*
                out
            }

            #[allow(unused_variables)]
            fn collect_field_dependencies(deps: &mut $crate::message::DependencyList) {
                $( <$field_ty as $crate::message::WireField>::collect_dependencies(deps); )*
            }
        }

        impl $crate::message::Randomize for $name {
            #[allow(unused_variables)]
            fn randomize<R: $crate::message::Rng + ?Sized>(rng: &mut R) -> Self {
                Self {
                    $( $field: <$field_ty as $crate::message::Randomize>::randomize(rng), )*
                }
            }
        }
    };
}

/// Define a service marker type over an existing request/response pair.
///
/// ```
/// use roswire::message::RosService;
/// use roswire::msgs::motion_msgs::PlanCartesianPath;
///
/// assert!(PlanCartesianPath::definition().contains("---\n"));
/// ```
#[macro_export]
macro_rules! ros_service {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($type_name:literal) {
            request: $request:ty,
            response: $response:ty $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        $vis struct $name;

        impl $crate::message::RosService for $name {
            const TYPE_NAME: &'static str = $type_name;
            type Request = $request;
            type Response = $response;
        }
    };
}
