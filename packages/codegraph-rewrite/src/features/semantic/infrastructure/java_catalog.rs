//! Well-known JDK types
//!
//! Member signatures are written as type templates. Class type parameters are
//! plain identifiers (`E`, `K`, `V`); `$0`, `$1` stand for argument types,
//! `$all` for the common type of every argument and `$num` for the numeric
//! promotion of the arguments. Everything else is fully qualified.

use lazy_static::lazy_static;
use rustc_hash::{FxHashMap, FxHashSet};

use super::java_types::{type_from_node, JavaType};
use crate::features::syntax::{parse_type_name, NodeIdAllocator};

#[derive(Debug, Clone)]
pub struct MethodInfo {
    /// Parameter count; `None` for varargs / unchecked overloads
    pub arity: Option<usize>,
    pub returns: JavaType,
    pub is_static: bool,
    /// Method-level type parameters
    pub type_params: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FieldInfo {
    pub ty: JavaType,
    pub is_static: bool,
}

/// Members of one class, interface, enum or record
#[derive(Debug, Clone, Default)]
pub struct ClassInfo {
    pub fqn: String,
    pub type_params: Vec<String>,
    pub supertypes: Vec<JavaType>,
    pub methods: FxHashMap<String, Vec<MethodInfo>>,
    pub fields: FxHashMap<String, FieldInfo>,
}

impl ClassInfo {
    pub fn new(fqn: impl Into<String>) -> Self {
        Self {
            fqn: fqn.into(),
            ..Default::default()
        }
    }

    pub fn add_method(&mut self, name: impl Into<String>, method: MethodInfo) {
        self.methods.entry(name.into()).or_default().push(method);
    }

    /// Type-variable bindings for an instance of this class (raw uses erase to Object)
    pub fn bindings_for(&self, args: &[JavaType]) -> FxHashMap<String, JavaType> {
        self.type_params
            .iter()
            .enumerate()
            .map(|(i, param)| {
                let arg = args.get(i).cloned().unwrap_or_else(JavaType::object);
                (param.clone(), arg)
            })
            .collect()
    }
}

struct ClassSpec {
    fqn: &'static str,
    params: &'static [&'static str],
    supers: &'static [&'static str],
    methods: &'static [(&'static str, &'static str)],
    statics: &'static [(&'static str, &'static str)],
    fields: &'static [(&'static str, &'static str)],
}

const EMPTY: ClassSpec = ClassSpec {
    fqn: "",
    params: &[],
    supers: &[],
    methods: &[],
    statics: &[],
    fields: &[],
};

const STRING_METHODS: &[(&str, &str)] = &[
    ("length", "int"),
    ("charAt", "char"),
    ("isEmpty", "boolean"),
    ("isBlank", "boolean"),
    ("substring", "java.lang.String"),
    ("trim", "java.lang.String"),
    ("strip", "java.lang.String"),
    ("toUpperCase", "java.lang.String"),
    ("toLowerCase", "java.lang.String"),
    ("split", "java.lang.String[]"),
    ("indexOf", "int"),
    ("lastIndexOf", "int"),
    ("contains", "boolean"),
    ("startsWith", "boolean"),
    ("endsWith", "boolean"),
    ("equalsIgnoreCase", "boolean"),
    ("replace", "java.lang.String"),
    ("replaceAll", "java.lang.String"),
    ("concat", "java.lang.String"),
    ("repeat", "java.lang.String"),
    ("toCharArray", "char[]"),
    ("getBytes", "byte[]"),
    ("chars", "java.util.stream.IntStream"),
    ("lines", "java.util.stream.Stream<java.lang.String>"),
    ("compareTo", "int"),
    ("matches", "boolean"),
    ("formatted", "java.lang.String"),
];

const COLLECTION_METHODS: &[(&str, &str)] = &[
    ("size", "int"),
    ("isEmpty", "boolean"),
    ("contains", "boolean"),
    ("add", "boolean"),
    ("remove", "boolean"),
    ("containsAll", "boolean"),
    ("addAll", "boolean"),
    ("removeAll", "boolean"),
    ("stream", "java.util.stream.Stream<E>"),
    ("iterator", "java.util.Iterator<E>"),
];

const LIST_METHODS: &[(&str, &str)] = &[
    ("get", "E"),
    ("set", "E"),
    ("indexOf", "int"),
    ("lastIndexOf", "int"),
    ("subList", "java.util.List<E>"),
    ("listIterator", "java.util.ListIterator<E>"),
];

const MAP_METHODS: &[(&str, &str)] = &[
    ("get", "V"),
    ("put", "V"),
    ("remove", "V"),
    ("getOrDefault", "V"),
    ("putIfAbsent", "V"),
    ("containsKey", "boolean"),
    ("containsValue", "boolean"),
    ("size", "int"),
    ("isEmpty", "boolean"),
    ("keySet", "java.util.Set<K>"),
    ("values", "java.util.Collection<V>"),
    ("entrySet", "java.util.Set<java.util.Map.Entry<K, V>>"),
];

const STREAM_METHODS: &[(&str, &str)] = &[
    ("filter", "java.util.stream.Stream<T>"),
    ("sorted", "java.util.stream.Stream<T>"),
    ("distinct", "java.util.stream.Stream<T>"),
    ("limit", "java.util.stream.Stream<T>"),
    ("skip", "java.util.stream.Stream<T>"),
    ("peek", "java.util.stream.Stream<T>"),
    ("count", "long"),
    ("toList", "java.util.List<T>"),
    ("findFirst", "java.util.Optional<T>"),
    ("findAny", "java.util.Optional<T>"),
    ("anyMatch", "boolean"),
    ("allMatch", "boolean"),
    ("noneMatch", "boolean"),
    ("iterator", "java.util.Iterator<T>"),
];

const INT_STREAM_METHODS: &[(&str, &str)] = &[
    ("sum", "int"),
    ("count", "long"),
    ("average", "java.util.OptionalDouble"),
    ("max", "java.util.OptionalInt"),
    ("min", "java.util.OptionalInt"),
    ("boxed", "java.util.stream.Stream<java.lang.Integer>"),
    ("toArray", "int[]"),
    ("filter", "java.util.stream.IntStream"),
    ("sorted", "java.util.stream.IntStream"),
    ("distinct", "java.util.stream.IntStream"),
    ("limit", "java.util.stream.IntStream"),
];

const THROWABLE_METHODS: &[(&str, &str)] = &[
    ("getMessage", "java.lang.String"),
    ("getLocalizedMessage", "java.lang.String"),
    ("getCause", "java.lang.Throwable"),
    ("getStackTrace", "java.lang.StackTraceElement[]"),
    ("getSuppressed", "java.lang.Throwable[]"),
];

const SPECS: &[ClassSpec] = &[
    // java.lang
    ClassSpec {
        fqn: "java.lang.Object",
        methods: &[("toString", "java.lang.String"), ("hashCode", "int"), ("equals", "boolean")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.lang.String",
        supers: &["java.lang.CharSequence", "java.lang.Comparable<java.lang.String>"],
        methods: STRING_METHODS,
        statics: &[
            ("valueOf", "java.lang.String"),
            ("format", "java.lang.String"),
            ("join", "java.lang.String"),
            ("copyValueOf", "java.lang.String"),
        ],
        fields: &[("CASE_INSENSITIVE_ORDER", "java.util.Comparator<java.lang.String>")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.lang.CharSequence",
        methods: &[("length", "int"), ("charAt", "char"), ("isEmpty", "boolean")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.lang.Comparable",
        params: &["T"],
        methods: &[("compareTo", "int")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.lang.StringBuilder",
        supers: &["java.lang.CharSequence"],
        methods: &[
            ("append", "java.lang.StringBuilder"),
            ("insert", "java.lang.StringBuilder"),
            ("reverse", "java.lang.StringBuilder"),
            ("deleteCharAt", "java.lang.StringBuilder"),
            ("toString", "java.lang.String"),
            ("length", "int"),
            ("indexOf", "int"),
            ("substring", "java.lang.String"),
        ],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.lang.StringBuffer",
        supers: &["java.lang.CharSequence"],
        methods: &[("append", "java.lang.StringBuffer"), ("toString", "java.lang.String"), ("length", "int")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.lang.Number",
        methods: &[
            ("intValue", "int"),
            ("longValue", "long"),
            ("doubleValue", "double"),
            ("floatValue", "float"),
        ],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.lang.Integer",
        supers: &["java.lang.Number", "java.lang.Comparable<java.lang.Integer>"],
        statics: &[
            ("parseInt", "int"),
            ("valueOf", "java.lang.Integer"),
            ("toString", "java.lang.String"),
            ("toHexString", "java.lang.String"),
            ("toBinaryString", "java.lang.String"),
            ("max", "int"),
            ("min", "int"),
            ("sum", "int"),
            ("compare", "int"),
        ],
        fields: &[("MAX_VALUE", "int"), ("MIN_VALUE", "int")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.lang.Long",
        supers: &["java.lang.Number", "java.lang.Comparable<java.lang.Long>"],
        statics: &[
            ("parseLong", "long"),
            ("valueOf", "java.lang.Long"),
            ("toString", "java.lang.String"),
            ("max", "long"),
            ("min", "long"),
            ("sum", "long"),
            ("compare", "int"),
        ],
        fields: &[("MAX_VALUE", "long"), ("MIN_VALUE", "long")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.lang.Double",
        supers: &["java.lang.Number", "java.lang.Comparable<java.lang.Double>"],
        statics: &[
            ("parseDouble", "double"),
            ("valueOf", "java.lang.Double"),
            ("toString", "java.lang.String"),
            ("isNaN", "boolean"),
            ("compare", "int"),
        ],
        fields: &[("MAX_VALUE", "double"), ("MIN_VALUE", "double"), ("NaN", "double")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.lang.Float",
        supers: &["java.lang.Number", "java.lang.Comparable<java.lang.Float>"],
        statics: &[("parseFloat", "float"), ("valueOf", "java.lang.Float")],
        fields: &[("MAX_VALUE", "float"), ("MIN_VALUE", "float")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.lang.Short",
        supers: &["java.lang.Number", "java.lang.Comparable<java.lang.Short>"],
        statics: &[("parseShort", "short"), ("valueOf", "java.lang.Short")],
        fields: &[("MAX_VALUE", "short"), ("MIN_VALUE", "short")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.lang.Byte",
        supers: &["java.lang.Number", "java.lang.Comparable<java.lang.Byte>"],
        statics: &[("parseByte", "byte"), ("valueOf", "java.lang.Byte")],
        fields: &[("MAX_VALUE", "byte"), ("MIN_VALUE", "byte")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.lang.Character",
        supers: &["java.lang.Comparable<java.lang.Character>"],
        statics: &[
            ("isDigit", "boolean"),
            ("isLetter", "boolean"),
            ("isWhitespace", "boolean"),
            ("isUpperCase", "boolean"),
            ("toUpperCase", "char"),
            ("toLowerCase", "char"),
            ("valueOf", "java.lang.Character"),
            ("getNumericValue", "int"),
        ],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.lang.Boolean",
        supers: &["java.lang.Comparable<java.lang.Boolean>"],
        statics: &[("parseBoolean", "boolean"), ("valueOf", "java.lang.Boolean")],
        fields: &[("TRUE", "java.lang.Boolean"), ("FALSE", "java.lang.Boolean")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.lang.Math",
        statics: &[
            ("max", "$num"),
            ("min", "$num"),
            ("abs", "$num"),
            ("sqrt", "double"),
            ("pow", "double"),
            ("floor", "double"),
            ("ceil", "double"),
            ("random", "double"),
            ("log", "double"),
            ("exp", "double"),
            ("sin", "double"),
            ("cos", "double"),
            ("hypot", "double"),
            ("floorDiv", "$num"),
            ("floorMod", "$num"),
        ],
        fields: &[("PI", "double"), ("E", "double")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.lang.System",
        statics: &[
            ("currentTimeMillis", "long"),
            ("nanoTime", "long"),
            ("getenv", "java.lang.String"),
            ("getProperty", "java.lang.String"),
            ("lineSeparator", "java.lang.String"),
            ("identityHashCode", "int"),
        ],
        fields: &[
            ("out", "java.io.PrintStream"),
            ("err", "java.io.PrintStream"),
            ("in", "java.io.InputStream"),
        ],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.lang.Thread",
        supers: &["java.lang.Runnable"],
        methods: &[("getName", "java.lang.String"), ("getId", "long"), ("isAlive", "boolean")],
        statics: &[("currentThread", "java.lang.Thread")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.lang.Runtime",
        methods: &[
            ("availableProcessors", "int"),
            ("totalMemory", "long"),
            ("freeMemory", "long"),
            ("maxMemory", "long"),
        ],
        statics: &[("getRuntime", "java.lang.Runtime")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.lang.Iterable",
        params: &["T"],
        methods: &[("iterator", "java.util.Iterator<T>")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.lang.Class",
        params: &["T"],
        methods: &[
            ("getName", "java.lang.String"),
            ("getSimpleName", "java.lang.String"),
            ("isInstance", "boolean"),
        ],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.lang.Throwable",
        methods: THROWABLE_METHODS,
        ..EMPTY
    },
    ClassSpec { fqn: "java.lang.Exception", supers: &["java.lang.Throwable"], ..EMPTY },
    ClassSpec { fqn: "java.lang.Error", supers: &["java.lang.Throwable"], ..EMPTY },
    ClassSpec { fqn: "java.lang.RuntimeException", supers: &["java.lang.Exception"], ..EMPTY },
    ClassSpec { fqn: "java.lang.InterruptedException", supers: &["java.lang.Exception"], ..EMPTY },
    ClassSpec { fqn: "java.lang.IllegalArgumentException", supers: &["java.lang.RuntimeException"], ..EMPTY },
    ClassSpec { fqn: "java.lang.IllegalStateException", supers: &["java.lang.RuntimeException"], ..EMPTY },
    ClassSpec { fqn: "java.lang.NullPointerException", supers: &["java.lang.RuntimeException"], ..EMPTY },
    ClassSpec { fqn: "java.lang.UnsupportedOperationException", supers: &["java.lang.RuntimeException"], ..EMPTY },
    ClassSpec { fqn: "java.lang.ArithmeticException", supers: &["java.lang.RuntimeException"], ..EMPTY },
    ClassSpec { fqn: "java.lang.ClassCastException", supers: &["java.lang.RuntimeException"], ..EMPTY },
    ClassSpec { fqn: "java.lang.IndexOutOfBoundsException", supers: &["java.lang.RuntimeException"], ..EMPTY },
    ClassSpec { fqn: "java.lang.NumberFormatException", supers: &["java.lang.IllegalArgumentException"], ..EMPTY },
    ClassSpec {
        fqn: "java.lang.StackTraceElement",
        methods: &[("getMethodName", "java.lang.String"), ("getLineNumber", "int")],
        ..EMPTY
    },
    ClassSpec { fqn: "java.lang.Runnable", ..EMPTY },
    ClassSpec { fqn: "java.lang.AutoCloseable", ..EMPTY },
    ClassSpec { fqn: "java.lang.Void", ..EMPTY },
    ClassSpec {
        fqn: "java.lang.ProcessBuilder",
        methods: &[("start", "java.lang.Process")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.lang.Process",
        methods: &[
            ("waitFor", "int"),
            ("exitValue", "int"),
            ("getInputStream", "java.io.InputStream"),
        ],
        ..EMPTY
    },
    // java.util
    ClassSpec {
        fqn: "java.util.Collection",
        params: &["E"],
        supers: &["java.lang.Iterable<E>"],
        methods: COLLECTION_METHODS,
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.List",
        params: &["E"],
        supers: &["java.util.Collection<E>"],
        methods: LIST_METHODS,
        statics: &[("of", "java.util.List<$all>"), ("copyOf", "java.util.List<$0>")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.ArrayList",
        params: &["E"],
        supers: &["java.util.List<E>"],
        methods: &[("trimToSize", "void")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.LinkedList",
        params: &["E"],
        supers: &["java.util.List<E>", "java.util.Deque<E>"],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.Set",
        params: &["E"],
        supers: &["java.util.Collection<E>"],
        statics: &[("of", "java.util.Set<$all>")],
        ..EMPTY
    },
    ClassSpec { fqn: "java.util.HashSet", params: &["E"], supers: &["java.util.Set<E>"], ..EMPTY },
    ClassSpec { fqn: "java.util.LinkedHashSet", params: &["E"], supers: &["java.util.Set<E>"], ..EMPTY },
    ClassSpec {
        fqn: "java.util.TreeSet",
        params: &["E"],
        supers: &["java.util.Set<E>"],
        methods: &[("first", "E"), ("last", "E")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.Queue",
        params: &["E"],
        supers: &["java.util.Collection<E>"],
        methods: &[("poll", "E"), ("peek", "E"), ("offer", "boolean"), ("element", "E")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.Deque",
        params: &["E"],
        supers: &["java.util.Queue<E>"],
        methods: &[
            ("pop", "E"),
            ("peekFirst", "E"),
            ("peekLast", "E"),
            ("pollFirst", "E"),
            ("pollLast", "E"),
        ],
        ..EMPTY
    },
    ClassSpec { fqn: "java.util.ArrayDeque", params: &["E"], supers: &["java.util.Deque<E>"], ..EMPTY },
    ClassSpec { fqn: "java.util.PriorityQueue", params: &["E"], supers: &["java.util.Queue<E>"], ..EMPTY },
    ClassSpec {
        fqn: "java.util.Stack",
        params: &["E"],
        supers: &["java.util.List<E>"],
        methods: &[("push", "E"), ("pop", "E"), ("peek", "E")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.Iterator",
        params: &["E"],
        methods: &[("next", "E"), ("hasNext", "boolean")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.ListIterator",
        params: &["E"],
        supers: &["java.util.Iterator<E>"],
        methods: &[("previous", "E"), ("hasPrevious", "boolean")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.Map",
        params: &["K", "V"],
        methods: MAP_METHODS,
        statics: &[("of", "java.util.Map<$0, $1>"), ("entry", "java.util.Map.Entry<$0, $1>")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.Map.Entry",
        params: &["K", "V"],
        methods: &[("getKey", "K"), ("getValue", "V"), ("setValue", "V")],
        ..EMPTY
    },
    ClassSpec { fqn: "java.util.HashMap", params: &["K", "V"], supers: &["java.util.Map<K, V>"], ..EMPTY },
    ClassSpec { fqn: "java.util.LinkedHashMap", params: &["K", "V"], supers: &["java.util.HashMap<K, V>"], ..EMPTY },
    ClassSpec {
        fqn: "java.util.TreeMap",
        params: &["K", "V"],
        supers: &["java.util.Map<K, V>"],
        methods: &[("firstKey", "K"), ("lastKey", "K")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.Optional",
        params: &["T"],
        methods: &[
            ("get", "T"),
            ("orElse", "T"),
            ("orElseThrow", "T"),
            ("isPresent", "boolean"),
            ("isEmpty", "boolean"),
            ("filter", "java.util.Optional<T>"),
        ],
        statics: &[
            ("of", "java.util.Optional<$0>"),
            ("ofNullable", "java.util.Optional<$0>"),
            ("empty", "java.util.Optional<java.lang.Object>"),
        ],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.OptionalInt",
        methods: &[("getAsInt", "int"), ("isPresent", "boolean"), ("orElse", "int")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.OptionalDouble",
        methods: &[("getAsDouble", "double"), ("isPresent", "boolean"), ("orElse", "double")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.Arrays",
        statics: &[
            ("asList", "java.util.List<$all>"),
            ("toString", "java.lang.String"),
            ("deepToString", "java.lang.String"),
            ("copyOf", "$0"),
            ("copyOfRange", "$0"),
            ("equals", "boolean"),
            ("hashCode", "int"),
            ("binarySearch", "int"),
        ],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.Collections",
        statics: &[
            ("emptyList", "java.util.List<java.lang.Object>"),
            ("emptySet", "java.util.Set<java.lang.Object>"),
            ("emptyMap", "java.util.Map<java.lang.Object, java.lang.Object>"),
            ("singletonList", "java.util.List<$0>"),
            ("singleton", "java.util.Set<$0>"),
            ("frequency", "int"),
        ],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.Objects",
        statics: &[
            ("requireNonNull", "$0"),
            ("requireNonNullElse", "$0"),
            ("equals", "boolean"),
            ("isNull", "boolean"),
            ("nonNull", "boolean"),
            ("hash", "int"),
            ("hashCode", "int"),
            ("toString", "java.lang.String"),
        ],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.Scanner",
        supers: &["java.util.Iterator<java.lang.String>"],
        methods: &[
            ("nextLine", "java.lang.String"),
            ("nextInt", "int"),
            ("nextLong", "long"),
            ("nextDouble", "double"),
            ("hasNextLine", "boolean"),
            ("hasNextInt", "boolean"),
        ],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.Random",
        methods: &[
            ("nextInt", "int"),
            ("nextLong", "long"),
            ("nextDouble", "double"),
            ("nextBoolean", "boolean"),
        ],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.UUID",
        methods: &[("toString", "java.lang.String")],
        statics: &[("randomUUID", "java.util.UUID"), ("fromString", "java.util.UUID")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.StringJoiner",
        methods: &[("add", "java.util.StringJoiner"), ("toString", "java.lang.String")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.Comparator",
        params: &["T"],
        methods: &[("reversed", "java.util.Comparator<T>"), ("compare", "int")],
        ..EMPTY
    },
    ClassSpec { fqn: "java.util.Date", methods: &[("getTime", "long")], ..EMPTY },
    ClassSpec {
        fqn: "java.util.Properties",
        methods: &[("getProperty", "java.lang.String")],
        ..EMPTY
    },
    // java.util.stream
    ClassSpec {
        fqn: "java.util.stream.Stream",
        params: &["T"],
        methods: STREAM_METHODS,
        statics: &[("of", "java.util.stream.Stream<$all>"), ("empty", "java.util.stream.Stream<java.lang.Object>")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.stream.IntStream",
        methods: INT_STREAM_METHODS,
        statics: &[
            ("range", "java.util.stream.IntStream"),
            ("rangeClosed", "java.util.stream.IntStream"),
            ("of", "java.util.stream.IntStream"),
        ],
        ..EMPTY
    },
    ClassSpec { fqn: "java.util.stream.Collectors", ..EMPTY },
    // java.util.function
    ClassSpec { fqn: "java.util.function.Function", params: &["T", "R"], methods: &[("apply", "R")], ..EMPTY },
    ClassSpec { fqn: "java.util.function.BiFunction", params: &["T", "U", "R"], methods: &[("apply", "R")], ..EMPTY },
    ClassSpec { fqn: "java.util.function.Supplier", params: &["T"], methods: &[("get", "T")], ..EMPTY },
    ClassSpec { fqn: "java.util.function.Consumer", params: &["T"], ..EMPTY },
    ClassSpec { fqn: "java.util.function.BiConsumer", params: &["T", "U"], ..EMPTY },
    ClassSpec { fqn: "java.util.function.Predicate", params: &["T"], methods: &[("test", "boolean")], ..EMPTY },
    ClassSpec { fqn: "java.util.function.UnaryOperator", params: &["T"], supers: &["java.util.function.Function<T, T>"], ..EMPTY },
    ClassSpec { fqn: "java.util.function.BinaryOperator", params: &["T"], supers: &["java.util.function.BiFunction<T, T, T>"], ..EMPTY },
    // java.util.concurrent
    ClassSpec { fqn: "java.util.concurrent.ConcurrentHashMap", params: &["K", "V"], supers: &["java.util.Map<K, V>"], ..EMPTY },
    ClassSpec {
        fqn: "java.util.concurrent.Executors",
        statics: &[
            ("newFixedThreadPool", "java.util.concurrent.ExecutorService"),
            ("newCachedThreadPool", "java.util.concurrent.ExecutorService"),
            ("newSingleThreadExecutor", "java.util.concurrent.ExecutorService"),
            ("newScheduledThreadPool", "java.util.concurrent.ScheduledExecutorService"),
        ],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.concurrent.ExecutorService",
        methods: &[("isShutdown", "boolean"), ("awaitTermination", "boolean")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.concurrent.ScheduledExecutorService",
        supers: &["java.util.concurrent.ExecutorService"],
        ..EMPTY
    },
    ClassSpec { fqn: "java.util.concurrent.Future", params: &["V"], methods: &[("get", "V"), ("isDone", "boolean")], ..EMPTY },
    ClassSpec {
        fqn: "java.util.concurrent.CompletableFuture",
        params: &["T"],
        supers: &["java.util.concurrent.Future<T>"],
        methods: &[("join", "T")],
        statics: &[("completedFuture", "java.util.concurrent.CompletableFuture<$0>")],
        ..EMPTY
    },
    ClassSpec { fqn: "java.util.concurrent.CountDownLatch", methods: &[("getCount", "long")], ..EMPTY },
    ClassSpec { fqn: "java.util.concurrent.TimeUnit", fields: &[
        ("NANOSECONDS", "java.util.concurrent.TimeUnit"),
        ("MILLISECONDS", "java.util.concurrent.TimeUnit"),
        ("SECONDS", "java.util.concurrent.TimeUnit"),
        ("MINUTES", "java.util.concurrent.TimeUnit"),
    ], ..EMPTY },
    ClassSpec {
        fqn: "java.util.concurrent.atomic.AtomicInteger",
        supers: &["java.lang.Number"],
        methods: &[
            ("get", "int"),
            ("incrementAndGet", "int"),
            ("getAndIncrement", "int"),
            ("decrementAndGet", "int"),
            ("addAndGet", "int"),
        ],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.concurrent.atomic.AtomicLong",
        supers: &["java.lang.Number"],
        methods: &[("get", "long"), ("incrementAndGet", "long"), ("addAndGet", "long")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.concurrent.atomic.AtomicBoolean",
        methods: &[("get", "boolean"), ("compareAndSet", "boolean")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.concurrent.atomic.AtomicReference",
        params: &["V"],
        methods: &[("get", "V"), ("getAndSet", "V")],
        ..EMPTY
    },
    // java.util.regex
    ClassSpec {
        fqn: "java.util.regex.Pattern",
        methods: &[("matcher", "java.util.regex.Matcher"), ("pattern", "java.lang.String")],
        statics: &[("compile", "java.util.regex.Pattern"), ("matches", "boolean"), ("quote", "java.lang.String")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.util.regex.Matcher",
        methods: &[
            ("matches", "boolean"),
            ("find", "boolean"),
            ("group", "java.lang.String"),
            ("start", "int"),
            ("end", "int"),
        ],
        ..EMPTY
    },
    // java.io
    ClassSpec {
        fqn: "java.io.File",
        methods: &[
            ("getName", "java.lang.String"),
            ("getPath", "java.lang.String"),
            ("getAbsolutePath", "java.lang.String"),
            ("getParentFile", "java.io.File"),
            ("exists", "boolean"),
            ("isDirectory", "boolean"),
            ("length", "long"),
            ("listFiles", "java.io.File[]"),
            ("toPath", "java.nio.file.Path"),
        ],
        ..EMPTY
    },
    ClassSpec { fqn: "java.io.Closeable", supers: &["java.lang.AutoCloseable"], ..EMPTY },
    ClassSpec {
        fqn: "java.io.InputStream",
        supers: &["java.io.Closeable"],
        methods: &[("read", "int"), ("readAllBytes", "byte[]"), ("available", "int")],
        ..EMPTY
    },
    ClassSpec { fqn: "java.io.OutputStream", supers: &["java.io.Closeable"], ..EMPTY },
    ClassSpec { fqn: "java.io.FileInputStream", supers: &["java.io.InputStream"], ..EMPTY },
    ClassSpec { fqn: "java.io.FileOutputStream", supers: &["java.io.OutputStream"], ..EMPTY },
    ClassSpec { fqn: "java.io.ByteArrayInputStream", supers: &["java.io.InputStream"], ..EMPTY },
    ClassSpec {
        fqn: "java.io.ByteArrayOutputStream",
        supers: &["java.io.OutputStream"],
        methods: &[("toByteArray", "byte[]"), ("toString", "java.lang.String"), ("size", "int")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.io.PrintStream",
        supers: &["java.io.OutputStream"],
        methods: &[("printf", "java.io.PrintStream"), ("format", "java.io.PrintStream")],
        ..EMPTY
    },
    ClassSpec { fqn: "java.io.Reader", supers: &["java.io.Closeable"], methods: &[("read", "int")], ..EMPTY },
    ClassSpec { fqn: "java.io.Writer", supers: &["java.io.Closeable"], ..EMPTY },
    ClassSpec { fqn: "java.io.InputStreamReader", supers: &["java.io.Reader"], ..EMPTY },
    ClassSpec { fqn: "java.io.FileReader", supers: &["java.io.InputStreamReader"], ..EMPTY },
    ClassSpec {
        fqn: "java.io.BufferedReader",
        supers: &["java.io.Reader"],
        methods: &[("readLine", "java.lang.String"), ("lines", "java.util.stream.Stream<java.lang.String>"), ("ready", "boolean")],
        ..EMPTY
    },
    ClassSpec { fqn: "java.io.BufferedWriter", supers: &["java.io.Writer"], ..EMPTY },
    ClassSpec { fqn: "java.io.FileWriter", supers: &["java.io.Writer"], ..EMPTY },
    ClassSpec {
        fqn: "java.io.PrintWriter",
        supers: &["java.io.Writer"],
        methods: &[("printf", "java.io.PrintWriter"), ("checkError", "boolean")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.io.StringWriter",
        supers: &["java.io.Writer"],
        methods: &[("toString", "java.lang.String")],
        ..EMPTY
    },
    ClassSpec { fqn: "java.io.IOException", supers: &["java.lang.Exception"], ..EMPTY },
    ClassSpec { fqn: "java.io.UncheckedIOException", supers: &["java.lang.RuntimeException"], ..EMPTY },
    ClassSpec { fqn: "java.io.FileNotFoundException", supers: &["java.io.IOException"], ..EMPTY },
    // java.nio
    ClassSpec {
        fqn: "java.nio.file.Path",
        methods: &[
            ("getFileName", "java.nio.file.Path"),
            ("getParent", "java.nio.file.Path"),
            ("resolve", "java.nio.file.Path"),
            ("normalize", "java.nio.file.Path"),
            ("toAbsolutePath", "java.nio.file.Path"),
            ("toFile", "java.io.File"),
            ("toString", "java.lang.String"),
        ],
        statics: &[("of", "java.nio.file.Path")],
        ..EMPTY
    },
    ClassSpec { fqn: "java.nio.file.Paths", statics: &[("get", "java.nio.file.Path")], ..EMPTY },
    ClassSpec {
        fqn: "java.nio.file.Files",
        statics: &[
            ("readAllLines", "java.util.List<java.lang.String>"),
            ("readString", "java.lang.String"),
            ("readAllBytes", "byte[]"),
            ("lines", "java.util.stream.Stream<java.lang.String>"),
            ("exists", "boolean"),
            ("isDirectory", "boolean"),
            ("size", "long"),
            ("write", "java.nio.file.Path"),
            ("writeString", "java.nio.file.Path"),
            ("createDirectories", "java.nio.file.Path"),
            ("createTempFile", "java.nio.file.Path"),
            ("newBufferedReader", "java.io.BufferedReader"),
            ("newBufferedWriter", "java.io.BufferedWriter"),
            ("list", "java.util.stream.Stream<java.nio.file.Path>"),
            ("walk", "java.util.stream.Stream<java.nio.file.Path>"),
        ],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.nio.charset.StandardCharsets",
        fields: &[
            ("UTF_8", "java.nio.charset.Charset"),
            ("US_ASCII", "java.nio.charset.Charset"),
            ("ISO_8859_1", "java.nio.charset.Charset"),
        ],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.nio.charset.Charset",
        methods: &[("name", "java.lang.String")],
        statics: &[("forName", "java.nio.charset.Charset"), ("defaultCharset", "java.nio.charset.Charset")],
        ..EMPTY
    },
    // java.time
    ClassSpec {
        fqn: "java.time.LocalDate",
        methods: &[
            ("getYear", "int"),
            ("getDayOfMonth", "int"),
            ("plusDays", "java.time.LocalDate"),
            ("minusDays", "java.time.LocalDate"),
            ("isBefore", "boolean"),
            ("isAfter", "boolean"),
        ],
        statics: &[("now", "java.time.LocalDate"), ("of", "java.time.LocalDate"), ("parse", "java.time.LocalDate")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.time.LocalDateTime",
        methods: &[("toLocalDate", "java.time.LocalDate"), ("plusHours", "java.time.LocalDateTime")],
        statics: &[("now", "java.time.LocalDateTime"), ("of", "java.time.LocalDateTime"), ("parse", "java.time.LocalDateTime")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.time.Instant",
        methods: &[("toEpochMilli", "long"), ("plus", "java.time.Instant"), ("isBefore", "boolean")],
        statics: &[("now", "java.time.Instant"), ("ofEpochMilli", "java.time.Instant"), ("parse", "java.time.Instant")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.time.Duration",
        methods: &[("toMillis", "long"), ("getSeconds", "long"), ("plus", "java.time.Duration")],
        statics: &[
            ("ofSeconds", "java.time.Duration"),
            ("ofMillis", "java.time.Duration"),
            ("ofMinutes", "java.time.Duration"),
            ("between", "java.time.Duration"),
        ],
        fields: &[("ZERO", "java.time.Duration")],
        ..EMPTY
    },
    // java.math
    ClassSpec {
        fqn: "java.math.BigDecimal",
        supers: &["java.lang.Number"],
        methods: &[
            ("add", "java.math.BigDecimal"),
            ("subtract", "java.math.BigDecimal"),
            ("multiply", "java.math.BigDecimal"),
            ("divide", "java.math.BigDecimal"),
            ("negate", "java.math.BigDecimal"),
            ("scale", "int"),
            ("compareTo", "int"),
        ],
        statics: &[("valueOf", "java.math.BigDecimal")],
        fields: &[("ZERO", "java.math.BigDecimal"), ("ONE", "java.math.BigDecimal"), ("TEN", "java.math.BigDecimal")],
        ..EMPTY
    },
    ClassSpec {
        fqn: "java.math.BigInteger",
        supers: &["java.lang.Number"],
        methods: &[
            ("add", "java.math.BigInteger"),
            ("subtract", "java.math.BigInteger"),
            ("multiply", "java.math.BigInteger"),
            ("mod", "java.math.BigInteger"),
            ("pow", "java.math.BigInteger"),
            ("compareTo", "int"),
        ],
        statics: &[("valueOf", "java.math.BigInteger")],
        fields: &[("ZERO", "java.math.BigInteger"), ("ONE", "java.math.BigInteger"), ("TWO", "java.math.BigInteger")],
        ..EMPTY
    },
    // java.net
    ClassSpec {
        fqn: "java.net.URI",
        methods: &[("getHost", "java.lang.String"), ("getPath", "java.lang.String"), ("toURL", "java.net.URL")],
        statics: &[("create", "java.net.URI")],
        ..EMPTY
    },
    ClassSpec { fqn: "java.net.URL", methods: &[("getHost", "java.lang.String"), ("toURI", "java.net.URI")], ..EMPTY },
];

/// Types known to exist (for name binding) without member information
const NAME_ONLY: &[&str] = &[
    "java.lang.Enum",
    "java.lang.Record",
    "java.lang.Override",
    "java.lang.Deprecated",
    "java.lang.SuppressWarnings",
    "java.lang.FunctionalInterface",
    "java.lang.SafeVarargs",
    "java.lang.Cloneable",
    "java.lang.Appendable",
    "java.lang.Readable",
    "java.lang.ThreadLocal",
    "java.lang.InheritableThreadLocal",
    "java.lang.Module",
    "java.lang.Package",
    "java.lang.ClassLoader",
    "java.lang.SecurityException",
    "java.lang.CloneNotSupportedException",
    "java.lang.ReflectiveOperationException",
    "java.lang.ClassNotFoundException",
    "java.lang.StackOverflowError",
    "java.lang.OutOfMemoryError",
    "java.lang.AssertionError",
    "java.lang.ArrayIndexOutOfBoundsException",
    "java.lang.StringIndexOutOfBoundsException",
    "java.lang.NegativeArraySizeException",
    "java.util.AbstractList",
    "java.util.AbstractMap",
    "java.util.BitSet",
    "java.util.Calendar",
    "java.util.EnumMap",
    "java.util.EnumSet",
    "java.util.IdentityHashMap",
    "java.util.Locale",
    "java.util.NavigableMap",
    "java.util.NavigableSet",
    "java.util.NoSuchElementException",
    "java.util.SortedMap",
    "java.util.SortedSet",
    "java.util.Timer",
    "java.util.Vector",
    "java.util.WeakHashMap",
    "java.util.ConcurrentModificationException",
    "java.util.stream.Collector",
    "java.util.stream.LongStream",
    "java.util.stream.DoubleStream",
    "java.util.function.IntFunction",
    "java.util.function.ToIntFunction",
    "java.util.function.IntPredicate",
    "java.util.concurrent.Callable",
    "java.util.concurrent.BlockingQueue",
    "java.util.concurrent.LinkedBlockingQueue",
    "java.util.concurrent.ExecutionException",
    "java.util.concurrent.TimeoutException",
    "java.util.concurrent.Semaphore",
    "java.util.concurrent.locks.Lock",
    "java.util.concurrent.locks.ReentrantLock",
    "java.io.Serializable",
    "java.io.DataInputStream",
    "java.io.DataOutputStream",
    "java.io.ObjectInputStream",
    "java.io.ObjectOutputStream",
    "java.io.BufferedInputStream",
    "java.io.BufferedOutputStream",
    "java.io.OutputStreamWriter",
    "java.io.StringReader",
    "java.nio.ByteBuffer",
    "java.nio.file.DirectoryStream",
    "java.nio.file.StandardOpenOption",
    "java.nio.file.NoSuchFileException",
    "java.time.ZonedDateTime",
    "java.time.ZoneId",
    "java.time.LocalTime",
    "java.time.Period",
    "java.time.format.DateTimeFormatter",
    "java.math.RoundingMode",
    "java.net.Socket",
    "java.net.ServerSocket",
    "java.net.InetAddress",
    "java.net.http.HttpClient",
    "java.net.http.HttpRequest",
    "java.net.http.HttpResponse",
    "java.awt.List",
    "java.awt.Color",
    "java.awt.Point",
    "java.awt.Rectangle",
    "java.awt.Component",
    "java.awt.Frame",
    "java.awt.Image",
    "java.awt.Font",
    "java.sql.Connection",
    "java.sql.Date",
    "java.sql.DriverManager",
    "java.sql.PreparedStatement",
    "java.sql.ResultSet",
    "java.sql.SQLException",
    "java.sql.Statement",
    "java.sql.Timestamp",
];

/// JDK type table
pub struct JavaCatalog {
    classes: FxHashMap<String, ClassInfo>,
    /// package or enclosing type → simple names of its members
    members: FxHashMap<String, FxHashSet<String>>,
}

impl JavaCatalog {
    fn build() -> Self {
        let mut classes = FxHashMap::default();
        for spec in SPECS {
            classes.insert(spec.fqn.to_string(), class_from_spec(spec));
        }
        let mut members: FxHashMap<String, FxHashSet<String>> = FxHashMap::default();
        for fqn in SPECS.iter().map(|s| s.fqn).chain(NAME_ONLY.iter().copied()) {
            if let Some((owner, simple)) = fqn.rsplit_once('.') {
                members
                    .entry(owner.to_string())
                    .or_default()
                    .insert(simple.to_string());
            }
        }
        Self { classes, members }
    }

    pub fn class(&self, fqn: &str) -> Option<&ClassInfo> {
        self.classes.get(fqn)
    }

    /// Whether `owner` (a package or type) is known
    pub fn knows_owner(&self, owner: &str) -> bool {
        self.members.contains_key(owner)
    }

    /// Fully-qualified name of `simple` inside `owner`, if it exists
    pub fn member(&self, owner: &str, simple: &str) -> Option<String> {
        self.members
            .get(owner)
            .filter(|names| names.contains(simple))
            .map(|_| format!("{}.{}", owner, simple))
    }

    /// Whether a fully-qualified type name is known
    pub fn knows_type(&self, fqn: &str) -> bool {
        fqn.rsplit_once('.')
            .is_some_and(|(owner, simple)| self.member(owner, simple).is_some())
    }
}

lazy_static! {
    pub static ref JAVA_CATALOG: JavaCatalog = JavaCatalog::build();
}

/// Parse a catalog template: dotted names are classes, bare names are variables
pub fn template(spelling: &str) -> Option<JavaType> {
    let mut ids = NodeIdAllocator::starting_at(0);
    let node = parse_type_name(spelling, &mut ids).ok()?;
    Some(type_from_node(&node, &|name| {
        if name.contains('.') {
            JavaType::class(name)
        } else {
            JavaType::TypeVariable(name.to_string())
        }
    }))
}

fn class_from_spec(spec: &ClassSpec) -> ClassInfo {
    let mut info = ClassInfo::new(spec.fqn);
    info.type_params = spec.params.iter().map(|p| p.to_string()).collect();
    info.supertypes = spec.supers.iter().filter_map(|s| template(s)).collect();
    let members = spec
        .methods
        .iter()
        .map(|m| (m, false))
        .chain(spec.statics.iter().map(|m| (m, true)));
    for ((name, returns), is_static) in members {
        let returns = if *returns == "void" {
            Some(JavaType::Error("void".to_string()))
        } else {
            template(returns)
        };
        if let Some(returns) = returns {
            info.add_method(
                *name,
                MethodInfo {
                    arity: None,
                    returns,
                    is_static,
                    type_params: Vec::new(),
                },
            );
        }
    }
    for (name, ty) in spec.fields {
        if let Some(ty) = template(ty) {
            info.fields.insert(
                name.to_string(),
                FieldInfo {
                    ty,
                    is_static: true,
                },
            );
        }
    }
    info
}
